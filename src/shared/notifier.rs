//! Change Notifier
//!
//! In-process publish/subscribe: named events fan out to registered
//! listeners synchronously and in registration order. One-shot listeners
//! are dropped before their first invocation runs, so re-entrant emits
//! cannot fire them twice. A failing listener is logged and never stops
//! its siblings.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

/// Listener signature: borrow the payload, report failure via `Result`.
pub type Listener<P> = Arc<dyn Fn(&P) -> anyhow::Result<()> + Send + Sync>;

struct Entry<P> {
    listener: Listener<P>,
    once: bool,
}

impl<P> Clone for Entry<P> {
    fn clone(&self) -> Self {
        Self {
            listener: Arc::clone(&self.listener),
            once: self.once,
        }
    }
}

/// Generic event emitter keyed by `E`, delivering payloads of type `P`.
pub struct ChangeNotifier<E, P> {
    listeners: DashMap<E, Vec<Entry<P>>>,
}

impl<E, P> ChangeNotifier<E, P>
where
    E: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
        }
    }

    /// Register a listener. Registering the same `Arc` twice for the same
    /// event is a no-op (identity dedupe).
    pub fn on(&self, event: E, listener: Listener<P>) {
        self.insert(event, listener, false);
    }

    /// Register a listener that is removed after its first invocation,
    /// whether or not that invocation succeeds.
    pub fn once(&self, event: E, listener: Listener<P>) {
        self.insert(event, listener, true);
    }

    fn insert(&self, event: E, listener: Listener<P>, once: bool) {
        let mut entries = self.listeners.entry(event).or_default();
        if entries.iter().any(|e| Arc::ptr_eq(&e.listener, &listener)) {
            return;
        }
        entries.push(Entry { listener, once });
    }

    /// Remove a previously registered listener, matched by identity.
    pub fn off(&self, event: &E, listener: &Listener<P>) {
        if let Some(mut entries) = self.listeners.get_mut(event) {
            entries.retain(|e| !Arc::ptr_eq(&e.listener, listener));
        }
    }

    /// Invoke every listener currently registered for `event`, in
    /// registration order. Listeners added during the emit see the next
    /// emit, not this one.
    pub fn emit(&self, event: &E, payload: &P) {
        let snapshot = match self.listeners.get_mut(event) {
            Some(mut entries) => {
                let snapshot: Vec<Entry<P>> = entries.clone();
                entries.retain(|e| !e.once);
                snapshot
            }
            None => return,
        };
        // The map guard is released before any listener runs, so listeners
        // may register or remove others without deadlocking.
        for entry in snapshot {
            if let Err(error) = (entry.listener)(payload) {
                tracing::warn!(%error, "change listener failed; continuing with remaining listeners");
            }
        }
    }

    /// Remove all listeners for all events.
    pub fn clear(&self) {
        self.listeners.clear();
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &E) -> usize {
        self.listeners.get(event).map(|e| e.len()).unwrap_or(0)
    }
}

impl<E, P> Default for ChangeNotifier<E, P>
where
    E: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
