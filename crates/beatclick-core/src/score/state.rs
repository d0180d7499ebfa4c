use serde::{Deserialize, Serialize};

/// Combo and hit/miss bookkeeping for one chart.
///
/// Only the scheduler tick writes this; everyone else gets copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub combo: u32,
    pub max_combo: u32,
    /// Objects resolved as hit
    pub hits: u32,
    /// Objects resolved as missed (timeouts)
    pub misses: u32,
    /// Inputs that matched no active object
    pub stray_inputs: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.combo += 1;
        if self.combo > self.max_combo {
            self.max_combo = self.combo;
        }
    }

    /// Object expired unresolved
    pub fn record_timeout(&mut self) {
        self.misses += 1;
        self.combo = 0;
    }

    /// Wasted input: breaks combo, no object counted
    pub fn record_input_miss(&mut self) {
        self.stray_inputs += 1;
        self.combo = 0;
    }

    /// Objects resolved so far
    pub fn resolved(&self) -> u32 {
        self.hits + self.misses
    }

    /// Hit ratio over resolved objects (0.0 when nothing is resolved)
    pub fn accuracy(&self) -> f64 {
        match self.resolved() {
            0 => 0.0,
            n => f64::from(self.hits) / f64::from(n),
        }
    }

    /// No object missed and no input wasted
    pub fn is_full_combo(&self) -> bool {
        self.misses == 0 && self.stray_inputs == 0 && self.hits > 0
    }
}
