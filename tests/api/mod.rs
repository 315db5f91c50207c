//! REST API Endpoint Tests

mod auth_tests;
mod health_tests;
mod notify_tests;
mod settings_tests;
mod webhook_tests;
