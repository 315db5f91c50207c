//! HTTP Interface
//!
//! Route configuration and request handlers.

pub mod handlers;
pub mod routes;

pub use routes::create_router;
