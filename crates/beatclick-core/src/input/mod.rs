//! Player input events and the queue that carries them to the scheduler.
//!
//! Input handlers on any thread push events through an `InputSender`; the
//! scheduler drains the matching `InputReceiver` at the start of each tick.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::chart::{KeySymbol, Point};
use crate::clock::PlaybackClock;

/// Pointer click in play-field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Playback position when the event arrived
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Key press
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub symbol: KeySymbol,
    /// Playback position when the event arrived
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

impl InputEvent {
    pub fn pointer(x: f64, y: f64, timestamp: f64) -> Self {
        Self::Pointer(PointerEvent { x, y, timestamp })
    }

    pub fn key<K: Into<KeySymbol>>(symbol: K, timestamp: f64) -> Self {
        Self::Key(KeyEvent {
            symbol: symbol.into(),
            timestamp,
        })
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            Self::Pointer(e) => e.timestamp,
            Self::Key(e) => e.timestamp,
        }
    }
}

/// Create a connected sender/receiver pair.
///
/// Events built by the sender are stamped with `clock`'s position.
pub fn input_channel(clock: PlaybackClock) -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx, clock }, InputReceiver { rx })
}

/// Producer side. Cheap to clone, one per input source.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
    clock: PlaybackClock,
}

impl InputSender {
    /// Queue a prebuilt event. Returns `false` if the session is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn pointer(&self, x: f64, y: f64) -> bool {
        self.send(InputEvent::pointer(x, y, self.clock.now()))
    }

    pub fn key<K: Into<KeySymbol>>(&self, symbol: K) -> bool {
        self.send(InputEvent::key(symbol, self.clock.now()))
    }
}

/// Consumer side, owned by the session
#[derive(Debug)]
pub struct InputReceiver {
    rx: Receiver<InputEvent>,
}

impl InputReceiver {
    /// Take everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<InputEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_events_stamped_with_clock() {
        let clock = PlaybackClock::new();
        let (tx, rx) = input_channel(clock.clone());
        clock.update_position(1.25);
        assert!(tx.pointer(10.0, 20.0));
        assert!(tx.key('a'));

        let events = rx.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::pointer(10.0, 20.0, 1.25),
                InputEvent::key(KeySymbol::new('A'), 1.25),
            ]
        );
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn test_multiple_producers_keep_per_sender_order() {
        let clock = PlaybackClock::new();
        let (tx, rx) = input_channel(clock);
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let tx = tx.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        tx.send(InputEvent::pointer(n as f64, i as f64, 0.0));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let events = rx.drain();
        assert_eq!(events.len(), 100);
        for n in 0..4 {
            let ys: Vec<f64> = events
                .iter()
                .filter_map(|e| match e {
                    InputEvent::Pointer(p) if p.x == n as f64 => Some(p.y),
                    _ => None,
                })
                .collect();
            let expected: Vec<f64> = (0..25).map(|i| i as f64).collect();
            assert_eq!(ys, expected);
        }
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = input_channel(PlaybackClock::new());
        drop(rx);
        assert!(!tx.key('w'));
    }
}
