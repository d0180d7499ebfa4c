//! Automatic player for the simulate command.
//!
//! Receives objects as they appear and answers through the same input queue a
//! human player's handlers would use.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use beatclick_core::{HitObject, InputSender};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Player behaviour
#[derive(Debug, Clone, Copy)]
pub struct AutoPlayerConfig {
    /// Chance of attempting each object
    pub accuracy: f64,
    /// Upper bound for the reaction delay, in seconds
    pub max_reaction: f64,
    pub seed: Option<u64>,
}

pub struct AutoPlayer {
    targets: Sender<HitObject>,
    worker: JoinHandle<()>,
}

impl AutoPlayer {
    pub fn spawn(input: InputSender, config: AutoPlayerConfig) -> std::io::Result<Self> {
        let (targets, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("auto-player".to_string())
            .spawn(move || play(rx, input, config))?;
        Ok(Self { targets, worker })
    }

    /// Hand a newly activated object to the player. Returns false once the
    /// player thread has stopped.
    pub fn target(&self, object: HitObject) -> bool {
        match self.targets.send(object) {
            Ok(()) => true,
            Err(mpsc::SendError(object)) => {
                debug!("Auto-player gone, object {} not targeted", object.id);
                false
            }
        }
    }

    /// Stop after the queued targets are handled
    pub fn finish(self) {
        drop(self.targets);
        if self.worker.join().is_err() {
            warn!("Auto-player thread panicked");
        }
    }
}

fn play(targets: Receiver<HitObject>, input: InputSender, config: AutoPlayerConfig) {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let accuracy = config.accuracy.clamp(0.0, 1.0);

    for object in targets {
        if !rng.random_bool(accuracy) {
            debug!("Auto-player skips object {}", object.id);
            continue;
        }

        let reaction = rng.random_range(0.0..=config.max_reaction.max(0.0));
        thread::sleep(Duration::from_secs_f64(reaction));

        let sent = match object.key_binding {
            Some(key) if rng.random_bool(0.5) => input.key(key),
            _ => input.pointer(object.position.x, object.position.y),
        };
        if !sent {
            // Session dropped its receiver
            break;
        }
    }
}
