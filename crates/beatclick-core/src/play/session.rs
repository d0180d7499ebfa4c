use tracing::{debug, info};

use crate::chart::{Chart, HitObject};
use crate::clock::PlaybackClock;
use crate::error::{Error, Result};
use crate::input::InputReceiver;
use crate::play::{Scheduler, SessionState, TickReport};
use crate::score::ScoreState;

/// One play-through of a chart.
///
/// Ties the scheduler to its input queue and clock handle and enforces the
/// session lifecycle around it.
#[derive(Debug)]
pub struct GameSession {
    scheduler: Scheduler,
    input: InputReceiver,
    clock: PlaybackClock,
    state: SessionState,
    object_count: usize,
}

impl GameSession {
    pub fn new(chart: &Chart, input: InputReceiver, clock: PlaybackClock) -> Result<Self> {
        Ok(Self {
            scheduler: Scheduler::new(chart)?,
            input,
            clock,
            state: SessionState::NotStarted,
            object_count: chart.len(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Begin ticking. An empty chart completes immediately.
    pub fn start(&mut self) -> Result<SessionState> {
        let next = if self.scheduler.is_complete() {
            SessionState::Completed
        } else {
            SessionState::Running
        };
        self.set_state(next)?;
        info!(
            "Session started with {} object(s), state {}",
            self.object_count, self.state
        );
        Ok(self.state)
    }

    /// Drain pending input and advance the scheduler to the clock's position
    pub fn tick(&mut self) -> Result<TickReport> {
        if !self.state.is_active() {
            return Err(Error::SessionNotRunning(self.state));
        }

        let events = self.input.drain();
        let snapshot = self.clock.snapshot();
        let mut report = self.scheduler.tick(snapshot, events);

        // A resume tick may also complete the chart
        if self.state == SessionState::Paused && report.state != SessionState::Paused {
            self.set_state(SessionState::Running)?;
        }
        if report.state != self.state {
            self.set_state(report.state)?;
        }
        report.state = self.state;
        Ok(report)
    }

    /// Abandon the session. Returns the score at the moment of cancellation.
    pub fn cancel(&mut self) -> Result<ScoreState> {
        self.set_state(SessionState::Cancelled)?;
        let score = *self.scheduler.score();
        info!(
            "Session cancelled: {} hit, {} missed",
            score.hits, score.misses
        );
        Ok(score)
    }

    /// Score of a finished session, `None` while it is still running
    pub fn final_score(&self) -> Option<ScoreState> {
        if self.state.is_terminal() {
            Some(*self.scheduler.score())
        } else {
            None
        }
    }

    pub fn score(&self) -> &ScoreState {
        self.scheduler.score()
    }

    pub fn objects(&self) -> &[HitObject] {
        self.scheduler.objects()
    }

    pub fn active_objects(&self) -> impl Iterator<Item = &HitObject> {
        self.scheduler.active_objects()
    }

    /// Number of objects currently on screen
    pub fn visible_count(&self) -> usize {
        self.active_objects().count()
    }

    fn set_state(&mut self, next: SessionState) -> Result<()> {
        if !SessionState::is_valid_transition(self.state, next) {
            return Err(Error::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!("Session state: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}
