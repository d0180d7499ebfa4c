use thiserror::Error;

use crate::play::SessionState;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Chart is empty: no beats to schedule")]
    EmptyChart,

    #[error("Invalid chart at object {index}: {reason}")]
    InvalidChart { index: usize, reason: String },

    #[error("Invalid decimation: {0} (must be at least 1)")]
    InvalidDecimation(u32),

    #[error("Invalid play field: {0}")]
    InvalidPlayField(String),

    #[error("A session is already active")]
    SessionAlreadyActive,

    #[error("No active session")]
    NoActiveSession,

    #[error("Session is not running (state: {0})")]
    SessionNotRunning(SessionState),

    #[error("Invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },

    #[error("Chart load failed: {0}")]
    ChartLoadFailed(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.message().to_string())
    }
}

impl Error {
    /// Errors that describe a valid but empty outcome rather than a failure.
    pub fn is_empty_chart(&self) -> bool {
        matches!(self, Error::EmptyChart)
    }
}
