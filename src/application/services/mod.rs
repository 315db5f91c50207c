//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Credential verification and JWT tokens
//! - **NotifyService**: API-key authenticated message delivery
//! - **UpdateService**: Inbound Telegram webhook updates

pub mod auth_service;
pub mod notify_service;
pub mod update_service;

// Re-export auth service types
pub use auth_service::{
    decode_token, hash_password, issue_token, verify_password, AuthError, AuthService,
    AuthServiceImpl, AuthTokens, Claims,
};

// Re-export notify service types
pub use notify_service::{NotificationSender, NotifyService};

// Re-export update service types
pub use update_service::UpdateService;
