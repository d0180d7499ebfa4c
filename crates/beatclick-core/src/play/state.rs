use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Lifecycle of a game session
///
/// ## State Transition Rules
///
/// Valid transitions:
/// - NotStarted -> Running (playback started)
/// - NotStarted -> Completed (empty chart)
/// - Running <-> Paused (transport paused / resumed)
/// - Running -> Completed (every object resolved, last window passed)
/// - NotStarted | Running | Paused -> Cancelled (mode exit, track change)
///
/// `Completed` and `Cancelled` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl SessionState {
    pub fn is_valid_transition(from: SessionState, to: SessionState) -> bool {
        if from == to {
            return !from.is_terminal();
        }

        matches!(
            (from, to),
            (SessionState::NotStarted, SessionState::Running)
                | (SessionState::NotStarted, SessionState::Completed)
                | (SessionState::Running, SessionState::Paused)
                | (SessionState::Paused, SessionState::Running)
                | (SessionState::Running, SessionState::Completed)
                | (SessionState::NotStarted, SessionState::Cancelled)
                | (SessionState::Running, SessionState::Cancelled)
                | (SessionState::Paused, SessionState::Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Cancelled)
    }

    /// Session currently owns the game mode
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Running | SessionState::Paused)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}
