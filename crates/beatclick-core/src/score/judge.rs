use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Why a miss was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum MissCause {
    /// Object expired without being hit
    Timeout,
    /// Input matched no active object
    Input,
}

impl std::fmt::Display for MissCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Judgement outcome reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JudgeEvent {
    Hit {
        id: usize,
        /// Tick time the hit was judged at
        time: f64,
        /// Input arrival time minus activation time
        offset: f64,
    },
    Miss {
        /// `None` for input misses
        id: Option<usize>,
        time: f64,
        cause: MissCause,
    },
}

impl JudgeEvent {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    pub fn object_id(&self) -> Option<usize> {
        match self {
            Self::Hit { id, .. } => Some(*id),
            Self::Miss { id, .. } => *id,
        }
    }
}
