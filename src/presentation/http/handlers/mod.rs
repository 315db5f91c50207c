//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod auth;
pub mod user;
pub mod group;
pub mod channel;
pub mod api_key;
pub mod settings;
pub mod notify;
pub mod webhook;
