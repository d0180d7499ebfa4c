//! Configuration and tuning constants.
//!
//! This module contains:
//! - `GameConfig` - user-tunable settings loaded from TOML
//! - `PlayField` - the rectangle objects are placed in
//! - Play-field, judgement and timing constants

mod game;

pub use game::*;

/// Play-field geometry defaults (pixels).
pub mod playfield {
    pub const WIDTH: f64 = 800.0;
    pub const HEIGHT: f64 = 600.0;

    /// Inset from every edge. The builder never uses less than the object radius.
    pub const MARGIN: f64 = 50.0;
}

/// Judgement defaults.
pub mod judgement {
    /// Seconds an object stays interactive after activation.
    pub const HIT_WINDOW_SECS: f64 = 1.0;

    /// Every Nth detected beat becomes an object.
    pub const DECIMATION: u32 = 5;

    /// Key symbols for key-press charts.
    pub const ALPHABET: [char; 4] = ['W', 'A', 'S', 'D'];
}

/// Tick driver timing.
pub mod timing {
    use std::time::Duration;

    /// Default tick cadence.
    pub const TICK_RATE_HZ: u32 = 60;

    /// Position update step of a transport that only reports whole seconds.
    pub const COARSE_CLOCK_STEP_SECS: f64 = 1.0;

    pub fn tick_interval(rate_hz: u32) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)))
    }
}
