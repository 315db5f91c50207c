//! Request DTOs
//!
//! Data structures for API request bodies. Runtime configuration writes
//! take the configuration schema type directly; its validation lives
//! with the configuration store.

use serde::Deserialize;
use validator::Validate;

use crate::config::RuntimeConfig;
use crate::domain::UserRole;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Create admin account request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: Option<UserRole>,
}

/// Update admin account request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,
}

/// Create channel request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    pub chat_id: i64,
}

/// Update channel request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    pub chat_id: Option<i64>,
}

/// Create API key request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateApiKeyRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,
}

/// Notification request, authenticated with an API key header
#[derive(Debug, Deserialize, Validate)]
pub struct NotifyRequest {
    #[validate(length(min = 1, max = 64, message = "Channel must be 1-64 characters"))]
    pub channel: String,

    #[validate(length(min = 1, max = 4096, message = "Message must be 1-4096 characters"))]
    pub message: String,
}

/// First-run setup request: the initial runtime configuration together
/// with the first admin account. Honored only while the service has
/// neither a stored configuration nor any admin accounts.
#[derive(Debug, Deserialize, Validate)]
pub struct SetupRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub settings: RuntimeConfig,
}

/// Database reachability test request
#[derive(Debug, Deserialize, Validate)]
pub struct TestDatabaseRequest {
    #[validate(length(min = 1, message = "Database URL must not be empty"))]
    pub database_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Request Validation Tests
    // ==========================================================================

    #[test]
    fn test_login_request_rejects_short_password() {
        let request = LoginRequest {
            username: "admin".to_string(),
            password: "short".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_notify_request_rejects_empty_message() {
        let request = NotifyRequest {
            channel: "deploys".to_string(),
            message: String::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_notify_request_accepts_max_length_message() {
        let request = NotifyRequest {
            channel: "deploys".to_string(),
            message: "x".repeat(4096),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_allows_all_fields_absent() {
        let request: UpdateUserRequest = serde_json::from_str("{}").unwrap();

        assert!(request.validate().is_ok());
        assert!(request.password.is_none());
        assert!(request.role.is_none());
    }

    #[test]
    fn test_role_deserializes_from_lowercase() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"username":"ops","password":"longenough","role":"viewer"}"#)
                .unwrap();

        assert_eq!(request.role, Some(UserRole::Viewer));
    }
}
