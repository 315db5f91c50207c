//! Listener Readiness Gate
//!
//! One-time process-wide gate flipped once the network listener is
//! accepting connections. Remote registrations that advertise this
//! process's public address (the bot webhook) wait on it.

use std::sync::Arc;

use tokio::sync::watch;

/// One-shot open gate. Starts closed; `open` is idempotent.
#[derive(Debug, Clone)]
pub struct ReadyGate {
    state: Arc<watch::Sender<bool>>,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn open(&self) {
        self.state.send_replace(true);
    }

    pub fn is_open(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the gate has opened; immediately if it already has.
    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // Sender is owned by `self`, so the channel stays open for the
        // duration of the borrow.
        let _ = rx.wait_for(|open| *open).await;
    }
}

impl Default for ReadyGate {
    fn default() -> Self {
        Self::new()
    }
}
