use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

/// Point-in-time view of the playback clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockSnapshot {
    pub position: f64,
    pub paused: bool,
    /// Incremented on every explicit seek
    pub seek_epoch: u64,
}

#[derive(Debug, Default)]
struct ClockInner {
    position: f64,
    paused: bool,
    seek_epoch: u64,
}

/// Authoritative game time, driven by the external transport.
///
/// Cloning yields another handle to the same clock, so transport callbacks on
/// other threads can update it while the scheduler reads snapshots. The value
/// is the last reported position; nothing is interpolated between updates.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    inner: Arc<Mutex<ClockInner>>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ClockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last known position in seconds
    pub fn now(&self) -> f64 {
        self.lock().position
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        let inner = self.lock();
        ClockSnapshot {
            position: inner.position,
            paused: inner.paused,
            seek_epoch: inner.seek_epoch,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Regular progress report from the transport.
    ///
    /// Ignored while paused. A position behind the current one is dropped:
    /// moving backwards requires `notify_seek`.
    pub fn update_position(&self, position: f64) {
        if !position.is_finite() {
            warn!("Ignoring non-finite playback position");
            return;
        }
        let mut inner = self.lock();
        if inner.paused {
            debug!("Position update {:.3}s while paused, ignored", position);
            return;
        }
        if position < inner.position {
            warn!(
                "Playback position went backwards without a seek ({:.3}s -> {:.3}s), ignored",
                inner.position, position
            );
            return;
        }
        inner.position = position;
    }

    /// Discontinuous jump to `position`, forwards or backwards
    pub fn notify_seek(&self, position: f64) {
        if !position.is_finite() {
            warn!("Ignoring seek to non-finite position");
            return;
        }
        let mut inner = self.lock();
        debug!("Seek {:.3}s -> {:.3}s", inner.position, position);
        inner.position = position.max(0.0);
        inner.seek_epoch += 1;
    }

    pub fn notify_pause(&self) {
        self.lock().paused = true;
    }

    pub fn notify_resume(&self) {
        self.lock().paused = false;
    }

    /// Back to zero, playing, with a fresh seek history
    pub fn reset(&self) {
        *self.lock() = ClockInner::default();
    }
}
