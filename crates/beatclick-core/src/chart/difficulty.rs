use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Difficulty tier. Fixes the hit-tolerance radius of every object in a chart.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[strum(serialize = "EASY")]
    Easy,
    #[default]
    #[strum(serialize = "NORMAL")]
    Normal,
    #[strum(serialize = "HARD")]
    Hard,
}

impl Difficulty {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Object radius in play-field pixels
    pub fn radius(&self) -> f64 {
        match self {
            Self::Easy => 50.0,
            Self::Normal => 40.0,
            Self::Hard => 30.0,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
