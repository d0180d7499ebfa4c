//! Ctrl+C handling for long-running commands.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Flag set once on shutdown; waiters wake early when it is triggered.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    triggered: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        let mut triggered = self
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *triggered = true;
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        *self
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for up to `timeout`. Returns `true` if shutdown was triggered.
    pub fn wait(&self, timeout: Duration) -> bool {
        let triggered = self
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (triggered, _) = self
            .condvar
            .wait_timeout_while(triggered, timeout, |t| !*t)
            .unwrap_or_else(PoisonError::into_inner);
        *triggered
    }
}
