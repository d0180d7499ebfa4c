//! # beatclick-core
//!
//! Core library for the beatclick rhythm game.
//!
//! This crate provides:
//! - Chart building from beat timestamps (decimation, placement, key binding)
//! - A playback clock adapter and input queue
//! - The per-tick scheduler that activates, judges and expires hit-objects
//! - Session lifecycle, score totals and result archiving
//! - Deterministic trace replay

pub mod chart;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod play;
pub mod replay;
pub mod score;
pub mod session;

// Re-export from chart module
pub use chart::{
    BeatAnalysis, BeatFile, BeatSource, Chart, ChartBuilder, ChartLoadHandle, ChartLoader,
    Difficulty, HitObject, HitObjectState, KeySymbol, LoadedChart, Point, load_chart,
};

// Re-export from clock module
pub use clock::{ClockSnapshot, PlaybackClock, SimulatedTransport, Transport};

// Re-export from config module
pub use config::{GameConfig, PlayField};

// Re-export from error module
pub use error::{Error, Result};

// Re-export from input module
pub use input::{InputEvent, InputReceiver, InputSender, input_channel};

// Re-export from play module
pub use play::{GameMode, GameSession, Scheduler, SessionState, TickReport, Transition};

// Re-export from replay module
pub use replay::{ReplayOutcome, TraceStep, load_trace, replay};

// Re-export from score module
pub use score::{JudgeEvent, MissCause, ScoreState, ScoreTotals};

// Re-export from session module
pub use session::{SessionManager, SessionResult};
