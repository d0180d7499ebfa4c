//! Playback clock adapter.
//!
//! - `PlaybackClock` - shared handle to the authoritative game time
//! - `ClockSnapshot` - what the scheduler reads once per tick
//! - `Transport` - commands issued to the audio transport
//! - `SimulatedTransport` - elapsed-time transport for tools and tests

mod playback;
mod transport;

pub use playback::*;
pub use transport::*;
