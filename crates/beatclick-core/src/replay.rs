//! Deterministic replay of recorded transport and input traces.
//!
//! A trace is a JSON array of steps, e.g.
//!
//! ```json
//! [
//!   { "type": "position", "time": 1.2 },
//!   { "type": "pointer", "x": 110.0, "y": 95.0 },
//!   { "type": "tick" }
//! ]
//! ```
//!
//! Steps drive a fresh clock and input queue; the session ticks only on `tick`
//! steps, so the same chart and trace always give the same outcome.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{Chart, HitObjectState, KeySymbol};
use crate::clock::PlaybackClock;
use crate::error::Result;
use crate::input::input_channel;
use crate::play::{GameSession, SessionState};
use crate::score::{JudgeEvent, ScoreState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceStep {
    /// Regular transport progress report
    Position { time: f64 },
    Seek { time: f64 },
    Pause,
    Resume,
    Pointer { x: f64, y: f64 },
    Key { symbol: KeySymbol },
    Tick,
}

/// Read a trace from a JSON file
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceStep>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub score: ScoreState,
    /// Final state of every object, by id
    pub object_states: Vec<HitObjectState>,
    pub state: SessionState,
    /// Every judgement, in order
    pub events: Vec<JudgeEvent>,
    pub ticks: usize,
}

/// Play `steps` against `chart`, ticking once more after the last step.
pub fn replay(chart: &Chart, steps: &[TraceStep]) -> Result<ReplayOutcome> {
    let clock = PlaybackClock::new();
    let (input, rx) = input_channel(clock.clone());
    let mut session = GameSession::new(chart, rx, clock.clone())?;
    session.start()?;

    let mut events = Vec::new();
    let mut ticks = 0;

    for step in steps.iter().chain(std::iter::once(&TraceStep::Tick)) {
        match step {
            TraceStep::Position { time } => clock.update_position(*time),
            TraceStep::Seek { time } => clock.notify_seek(*time),
            TraceStep::Pause => clock.notify_pause(),
            TraceStep::Resume => clock.notify_resume(),
            TraceStep::Pointer { x, y } => {
                input.pointer(*x, *y);
            }
            TraceStep::Key { symbol } => {
                input.key(*symbol);
            }
            TraceStep::Tick => {
                if !session.state().is_active() {
                    continue;
                }
                let report = session.tick()?;
                ticks += 1;
                events.extend(report.events);
            }
        }
    }

    debug!(
        "Replayed {} step(s) in {} tick(s), session {}",
        steps.len(),
        ticks,
        session.state()
    );

    Ok(ReplayOutcome {
        score: *session.score(),
        object_states: session.objects().iter().map(|o| o.state).collect(),
        state: session.state(),
        events,
        ticks,
    })
}
