//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod drain;
pub mod error;
pub mod notifier;
pub mod ready;
pub mod resource;
pub mod validation;
