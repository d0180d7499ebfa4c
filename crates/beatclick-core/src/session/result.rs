use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::chart::Difficulty;
use crate::play::{GameSession, SessionState};
use crate::score::ScoreState;

/// Outcome of one session, as archived and exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub difficulty: Difficulty,
    /// Number of objects in the chart played
    pub chart_objects: usize,
    pub score: ScoreState,
    /// `Completed` or `Cancelled`
    pub state: SessionState,
    pub finished_at: DateTime<Local>,
}

impl SessionResult {
    pub fn new(
        difficulty: Difficulty,
        chart_objects: usize,
        score: ScoreState,
        state: SessionState,
    ) -> Self {
        Self {
            difficulty,
            chart_objects,
            score,
            state,
            finished_at: Local::now(),
        }
    }

    /// Snapshot a session; `None` while it is still running
    pub fn from_session(session: &GameSession, difficulty: Difficulty) -> Option<Self> {
        session.final_score().map(|score| {
            Self::new(difficulty, session.object_count(), score, session.state())
        })
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Objects neither hit nor missed, non-zero only for cancelled sessions
    pub fn unresolved(&self) -> usize {
        self.chart_objects
            .saturating_sub(self.score.resolved() as usize)
    }
}
