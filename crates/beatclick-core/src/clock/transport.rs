use tracing::debug;

use crate::clock::PlaybackClock;

/// Commands the game core issues to the audio transport.
///
/// Implementations report progress back through a `PlaybackClock`.
pub trait Transport {
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn seek(&mut self, position: f64);
    fn stop(&mut self);
}

/// Transport stand-in that advances from elapsed time instead of audio output.
///
/// With a coarse step set, the reported position snaps down to multiples of
/// the step, like a player that only reports whole seconds.
#[derive(Debug)]
pub struct SimulatedTransport {
    clock: PlaybackClock,
    position: f64,
    duration: Option<f64>,
    coarse_step: Option<f64>,
    playing: bool,
    paused: bool,
}

impl SimulatedTransport {
    pub fn new(clock: PlaybackClock) -> Self {
        Self {
            clock,
            position: 0.0,
            duration: None,
            coarse_step: None,
            playing: false,
            paused: false,
        }
    }

    /// Stop advancing once `duration` seconds have played
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_coarse_step(mut self, step: f64) -> Self {
        self.coarse_step = (step > 0.0).then_some(step);
        self
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing && !self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.duration.is_some_and(|d| self.position >= d)
    }

    /// Advance by `dt` seconds of playback and report to the clock
    pub fn advance(&mut self, dt: f64) {
        if !self.is_playing() || self.is_finished() {
            return;
        }
        self.position += dt.max(0.0);
        if let Some(duration) = self.duration {
            self.position = self.position.min(duration);
        }
        self.clock.update_position(self.reported());
    }

    fn reported(&self) -> f64 {
        match self.coarse_step {
            Some(step) => (self.position / step).floor() * step,
            None => self.position,
        }
    }
}

impl Transport for SimulatedTransport {
    fn play(&mut self) {
        debug!("Transport: play");
        self.position = 0.0;
        self.playing = true;
        self.paused = false;
        self.clock.reset();
    }

    fn pause(&mut self) {
        debug!("Transport: pause at {:.3}s", self.position);
        self.paused = true;
        self.clock.notify_pause();
    }

    fn resume(&mut self) {
        debug!("Transport: resume at {:.3}s", self.position);
        self.paused = false;
        self.clock.notify_resume();
    }

    fn seek(&mut self, position: f64) {
        self.position = position.max(0.0);
        self.clock.notify_seek(self.reported());
    }

    fn stop(&mut self) {
        debug!("Transport: stop");
        self.playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_reports_position() {
        let clock = PlaybackClock::new();
        let mut transport = SimulatedTransport::new(clock.clone());
        transport.advance(1.0);
        assert_eq!(clock.now(), 0.0, "not playing yet");

        transport.play();
        transport.advance(0.25);
        transport.advance(0.25);
        assert_eq!(clock.now(), 0.5);
    }

    #[test]
    fn test_coarse_step_staircase() {
        let clock = PlaybackClock::new();
        let mut transport = SimulatedTransport::new(clock.clone()).with_coarse_step(1.0);
        transport.play();
        transport.advance(0.9);
        assert_eq!(clock.now(), 0.0);
        transport.advance(0.2);
        assert_eq!(clock.now(), 1.0);
        assert!((transport.position() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_pause_and_resume() {
        let clock = PlaybackClock::new();
        let mut transport = SimulatedTransport::new(clock.clone());
        transport.play();
        transport.advance(1.0);
        transport.pause();
        transport.advance(5.0);
        assert_eq!(clock.now(), 1.0);
        assert!(clock.is_paused());
        transport.resume();
        transport.advance(1.0);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn test_seek_notifies_clock() {
        let clock = PlaybackClock::new();
        let mut transport = SimulatedTransport::new(clock.clone());
        transport.play();
        transport.advance(3.0);
        transport.seek(1.0);
        let snap = clock.snapshot();
        assert_eq!(snap.position, 1.0);
        assert_eq!(snap.seek_epoch, 1);
    }

    #[test]
    fn test_duration_caps_playback() {
        let clock = PlaybackClock::new();
        let mut transport = SimulatedTransport::new(clock.clone()).with_duration(2.0);
        transport.play();
        transport.advance(1.5);
        transport.advance(1.5);
        assert!(transport.is_finished());
        assert_eq!(clock.now(), 2.0);
    }
}
