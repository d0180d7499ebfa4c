use tracing::{info, warn};

use crate::chart::{Chart, Difficulty};
use crate::clock::PlaybackClock;
use crate::error::{Error, Result};
use crate::input::InputReceiver;
use crate::play::{GameSession, TickReport};
use crate::score::ScoreTotals;
use crate::session::{SessionManager, SessionResult};

/// Play mode: at most one session at a time plus totals across sessions.
#[derive(Debug, Default)]
pub struct GameMode {
    session: Option<GameSession>,
    difficulty: Difficulty,
    totals: ScoreTotals,
    archive: Option<SessionManager>,
    results: Vec<SessionResult>,
}

impl GameMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_totals(mut self, totals: ScoreTotals) -> Self {
        self.totals = totals;
        self
    }

    /// Record finished sessions through `archive`
    pub fn with_archive(mut self, archive: SessionManager) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn totals(&self) -> &ScoreTotals {
        &self.totals
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Results of sessions finished in this mode, oldest first
    pub fn results(&self) -> &[SessionResult] {
        &self.results
    }

    pub fn has_active_session(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.state().is_terminal())
    }

    /// Start playing `chart`. Fails while another session is still live.
    pub fn start_session(
        &mut self,
        chart: &Chart,
        input: InputReceiver,
        clock: PlaybackClock,
    ) -> Result<&GameSession> {
        if self.has_active_session() {
            return Err(Error::SessionAlreadyActive);
        }

        let mut session = GameSession::new(chart, input, clock)?;
        session.start()?;
        let finished = session.state().is_terminal();
        self.difficulty = chart.difficulty;
        self.session = Some(session);

        // Empty chart
        if finished {
            self.take_finished(true)?;
        }
        self.session.as_ref().ok_or(Error::NoActiveSession)
    }

    /// Tick the current session; completion is merged into the totals
    pub fn tick(&mut self) -> Result<TickReport> {
        let session = self.session.as_mut().ok_or(Error::NoActiveSession)?;
        let report = session.tick()?;
        if report.completed {
            self.take_finished(true)?;
        }
        Ok(report)
    }

    /// Cancel the current session. Its partial score only counts if `merge`.
    pub fn cancel_session(&mut self, merge: bool) -> Result<SessionResult> {
        let session = self
            .session
            .as_mut()
            .filter(|s| !s.state().is_terminal())
            .ok_or(Error::NoActiveSession)?;
        session.cancel()?;
        self.take_finished(merge)?;
        self.results.last().cloned().ok_or(Error::NoActiveSession)
    }

    /// Leave the mode, cancelling a live session without merging it
    pub fn exit_mode(mut self) -> ScoreTotals {
        if self.has_active_session() {
            if let Err(e) = self.cancel_session(false) {
                warn!("Failed to cancel session on exit: {}", e);
            }
        }
        info!(
            "Leaving game mode after {} session(s)",
            self.totals.sessions
        );
        self.totals
    }

    /// Record the finished session. It stays readable until the next start.
    fn take_finished(&mut self, merge: bool) -> Result<()> {
        let session = self.session.as_ref().ok_or(Error::NoActiveSession)?;
        let result = SessionResult::from_session(session, self.difficulty)
            .ok_or(Error::SessionNotRunning(session.state()))?;

        if merge {
            self.totals.merge(&result.score);
            if let Some(archive) = self.archive.as_mut() {
                if let Err(e) = archive.record(&result) {
                    warn!("Failed to archive session result: {}", e);
                }
            }
        }
        info!(
            "Session {}: {} hit, {} missed, max combo {}",
            result.state, result.score.hits, result.score.misses, result.score.max_combo
        );
        self.results.push(result);
        Ok(())
    }
}
