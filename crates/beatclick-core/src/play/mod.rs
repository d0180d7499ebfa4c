//! Real-time play: scheduling, judgement and the session lifecycle.
//!
//! - `Scheduler` - per-tick activation, judgement and expiry of hit-objects
//! - `TickReport`, `Transition` - what one tick changed
//! - `SessionState` - session lifecycle with validated transitions
//! - `GameSession` - scheduler wired to an input queue and a clock
//! - `GameMode` - one session at a time plus persistent totals

mod mode;
mod scheduler;
mod session;
mod state;

pub use mode::*;
pub use scheduler::*;
pub use session::*;
pub use state::*;
