use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::score::ScoreState;

/// Persistent totals across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTotals {
    pub sessions: u32,
    pub hits: u64,
    pub misses: u64,
    pub best_max_combo: u32,
}

impl ScoreTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, score: &ScoreState) {
        self.sessions += 1;
        self.hits += u64::from(score.hits);
        self.misses += u64::from(score.misses);
        if score.max_combo > self.best_max_combo {
            self.best_max_combo = score.max_combo;
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
