//! Chart-related types and data structures.
//!
//! This module contains types for turning beats into playable charts:
//! - `HitObject`, `HitObjectState`, `Point`, `KeySymbol` - hit-object data
//! - `Chart` - ordered, immutable set of hit-objects
//! - `ChartBuilder` - beat decimation and random placement
//! - `Difficulty` - difficulty tiers (EASY, NORMAL, HARD)
//! - `ChartLoader` - background analysis + chart building

mod builder;
mod chart;
mod difficulty;
mod hit_object;
mod loader;

pub use builder::*;
pub use chart::*;
pub use difficulty::*;
pub use hit_object::*;
pub use loader::*;
