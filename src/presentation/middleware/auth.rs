//! Authentication Middleware
//!
//! JWT validation middleware for protected routes. The signing secret
//! lives in the runtime configuration and is read per request, so a
//! rotated secret cuts off outstanding tokens on their next use.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::application::services::{decode_token, AuthError};
use crate::domain::UserRole;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    /// Mutating panel operations are reserved for admins.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".into()))
        }
    }
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    // Check for Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    // No configuration means no signing secret; nothing can validate.
    let secret = state
        .store
        .get()
        .map(|config| config.signing_secret.clone())
        .ok_or(AppError::NotConfigured)?;

    // Decode and validate JWT against the current secret
    let claims = decode_token(token, &secret).map_err(|e| match e {
        AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    // Parse user ID from claims
    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

    // Insert authenticated user into request extensions
    request.extensions_mut().insert(AuthUser {
        user_id,
        role: UserRole::from_str(&claims.role),
    });

    // Continue to the next handler
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Role Gate Tests
    // ==========================================================================

    #[test]
    fn test_admin_passes_the_role_gate() {
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        assert!(auth.require_admin().is_ok());
    }

    #[test]
    fn test_viewer_is_refused_mutations() {
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Viewer,
        };
        let err = auth.require_admin().unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
