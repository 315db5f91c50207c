//! Drain Latch
//!
//! A counted hold/release gate with an asynchronous "wait until idle"
//! operation. Reconfiguration sequencing uses it to block a new setup
//! until the previous teardown has observably finished. It is not a
//! mutex: it grants no exclusive section, only a drain signal.

use std::sync::Arc;

use tokio::sync::watch;

/// Counted latch that resolves `wait_idle` when no holds are outstanding.
#[derive(Debug, Clone)]
pub struct DrainLatch {
    count: Arc<watch::Sender<usize>>,
}

/// RAII hold on a [`DrainLatch`]. Releases on drop.
#[derive(Debug)]
pub struct DrainHold {
    count: Arc<watch::Sender<usize>>,
}

impl DrainLatch {
    pub fn new() -> Self {
        Self {
            count: Arc::new(watch::Sender::new(0)),
        }
    }

    /// Acquire one hold. The latch is busy until the returned guard drops.
    pub fn hold(&self) -> DrainHold {
        self.count.send_modify(|n| *n += 1);
        DrainHold {
            count: Arc::clone(&self.count),
        }
    }

    /// Number of outstanding holds.
    pub fn active(&self) -> usize {
        *self.count.borrow()
    }

    /// Resolves once the hold count reaches zero. Returns immediately when
    /// the latch is already idle. Each call observes its own idle edge, so
    /// a caller for the next busy period gets a fresh wait.
    pub async fn wait_idle(&self) {
        let mut rx = self.count.subscribe();
        // The sender lives inside `self`, which is borrowed for the whole
        // await, so the channel cannot close mid-wait.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

impl Default for DrainLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DrainHold {
    fn drop(&mut self) {
        self.count.send_modify(|n| *n = n.saturating_sub(1));
    }
}
