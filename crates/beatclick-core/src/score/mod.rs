//! Score-related types and data structures.
//!
//! This module contains types for representing scores and judgements:
//! - `ScoreState` - combo, max combo, hit/miss counts for one chart
//! - `JudgeEvent`, `MissCause` - judgement outcomes reported per tick
//! - `ScoreTotals` - persistent totals across sessions

mod judge;
mod state;
mod totals;

pub use judge::*;
pub use state::*;
pub use totals::*;
