//! Resource Reference Cells
//!
//! A `ResourceRef<T>` is the indirection between a lifecycle manager and
//! the call sites that use whatever the manager currently provides. The
//! manager republishes into the cell on every reconfiguration; consumers
//! that captured the cell once keep observing the current instance.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Typed absence error for configuration-derived resources.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource '{0}' is not ready")]
    NotReady(&'static str),
}

/// Atomically replaceable handle to the current instance of `T`.
pub struct ResourceRef<T> {
    name: &'static str,
    slot: Arc<ArcSwapOption<T>>,
}

impl<T> ResourceRef<T> {
    /// Create an empty cell. `name` identifies the resource in errors
    /// and logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Arc::new(ArcSwapOption::empty()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current instance, or a typed not-ready error when the owning
    /// manager has published nothing (or published absence).
    pub fn get(&self) -> Result<Arc<T>, ResourceError> {
        self.slot
            .load_full()
            .ok_or(ResourceError::NotReady(self.name))
    }

    /// Current instance without the error wrapping, for presence checks.
    pub fn current(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    pub fn is_ready(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Replace the held instance. `None` returns the cell to not-ready.
    pub fn publish(&self, value: Option<T>) {
        self.slot.store(value.map(Arc::new));
    }
}

impl<T> Clone for ResourceRef<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> std::fmt::Debug for ResourceRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRef")
            .field("name", &self.name)
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // ResourceRef Tests
    // ==========================================================================

    #[test]
    fn test_get_before_publish_is_not_ready() {
        let cell: ResourceRef<u32> = ResourceRef::new("widget");
        let err = cell.get().unwrap_err();
        assert_eq!(err.to_string(), "resource 'widget' is not ready");
        assert!(!cell.is_ready());
    }

    #[test]
    fn test_get_returns_last_published_value() {
        let cell = ResourceRef::new("widget");
        cell.publish(Some(1u32));
        assert_eq!(*cell.get().unwrap(), 1);

        cell.publish(Some(2u32));
        assert_eq!(*cell.get().unwrap(), 2);
    }

    #[test]
    fn test_publishing_none_returns_to_not_ready() {
        let cell = ResourceRef::new("widget");
        cell.publish(Some(5u32));
        assert!(cell.is_ready());

        cell.publish(None);
        assert!(cell.get().is_err());
        assert!(cell.current().is_none());
    }

    #[test]
    fn test_clones_observe_the_same_slot() {
        let cell = ResourceRef::new("widget");
        let reader = cell.clone();

        cell.publish(Some(9u32));
        assert_eq!(*reader.get().unwrap(), 9);
    }
}
