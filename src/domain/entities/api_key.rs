//! API key entity and repository trait.
//!
//! Keys have the shape `nk_<prefix>_<secret>`. Only a SHA-256 digest of
//! the full key is stored; the plaintext is shown exactly once at
//! creation time. Lookup at request time goes through the public prefix
//! so a digest comparison only runs against a single row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Scheme tag all keys start with.
pub const KEY_SCHEME: &str = "nk";

/// Represents a notification API key.
///
/// Maps to the `api_keys` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(64) NOT NULL
/// - prefix: VARCHAR(16) NOT NULL UNIQUE
/// - key_digest: VARCHAR(64) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - last_used_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Primary key
    pub id: Uuid,

    /// Operator-facing label
    pub name: String,

    /// Public key prefix, embedded in the plaintext key
    pub prefix: String,

    /// SHA-256 hex digest of the full plaintext key
    #[serde(skip_serializing)]
    pub key_digest: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent successful authentication
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Generate a fresh key. Returns the row to store together with the
    /// plaintext key, which is not recoverable afterwards.
    pub fn mint(name: &str) -> (Self, String) {
        let prefix = random_token(8);
        let secret = random_token(32);
        let raw = format!("{}_{}_{}", KEY_SCHEME, prefix, secret);

        let key = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            prefix,
            key_digest: Self::digest(&raw),
            created_at: Utc::now(),
            last_used_at: None,
        };
        (key, raw)
    }

    /// SHA-256 hex digest of a plaintext key.
    pub fn digest(raw_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Extract the public prefix from a plaintext key, if the key has
    /// the expected `nk_<prefix>_<secret>` shape.
    pub fn prefix_of(raw_key: &str) -> Option<&str> {
        let rest = raw_key.strip_prefix(KEY_SCHEME)?.strip_prefix('_')?;
        let (prefix, secret) = rest.split_once('_')?;
        if prefix.is_empty() || secret.is_empty() {
            return None;
        }
        Some(prefix)
    }

    /// Whether a plaintext key digests to this row.
    pub fn matches(&self, raw_key: &str) -> bool {
        Self::digest(raw_key) == self.key_digest
    }
}

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Repository trait for API key data access operations.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// List all keys, newest first.
    async fn list(&self) -> Result<Vec<ApiKey>, AppError>;

    /// Find a key by its ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>, AppError>;

    /// Find a key by its public prefix.
    async fn find_by_prefix(&self, prefix: &str) -> Result<Option<ApiKey>, AppError>;

    /// Create a new key.
    async fn create(&self, key: &ApiKey) -> Result<ApiKey, AppError>;

    /// Delete a key by ID.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Record a successful authentication with this key.
    async fn touch_last_used(&self, id: Uuid) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn key_row(raw: &str) -> ApiKey {
        ApiKey {
            id: Uuid::new_v4(),
            name: "ci".to_string(),
            prefix: ApiKey::prefix_of(raw).unwrap_or_default().to_string(),
            key_digest: ApiKey::digest(raw),
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    // ==========================================================================
    // Key Shape Tests
    // ==========================================================================

    #[test_case("nk_abcd1234_s3cr3ts3cr3t", Some("abcd1234") ; "well formed key")]
    #[test_case("nk_abcd1234_", None ; "empty secret")]
    #[test_case("nk__s3cr3t", None ; "empty prefix")]
    #[test_case("nk_abcd1234", None ; "missing secret separator")]
    #[test_case("sk_abcd1234_s3cr3t", None ; "foreign scheme")]
    #[test_case("", None ; "empty string")]
    fn test_prefix_extraction(raw: &str, expected: Option<&str>) {
        assert_eq!(ApiKey::prefix_of(raw), expected);
    }

    #[test]
    fn test_secret_may_itself_contain_underscores() {
        assert_eq!(ApiKey::prefix_of("nk_abcd_sec_ret"), Some("abcd"));
    }

    // ==========================================================================
    // Minting Tests
    // ==========================================================================

    #[test]
    fn test_minted_key_parses_and_matches() {
        let (key, raw) = ApiKey::mint("deploys");

        assert_eq!(key.name, "deploys");
        assert_eq!(ApiKey::prefix_of(&raw), Some(key.prefix.as_str()));
        assert!(key.matches(&raw));
        assert!(key.last_used_at.is_none());
    }

    #[test]
    fn test_minted_keys_are_unique() {
        let (a, raw_a) = ApiKey::mint("a");
        let (b, raw_b) = ApiKey::mint("b");

        assert_ne!(raw_a, raw_b);
        assert_ne!(a.prefix, b.prefix);
    }

    // ==========================================================================
    // Digest Tests
    // ==========================================================================

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = ApiKey::digest("nk_abcd_secret");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_matches_accepts_the_original_key_only() {
        let raw = "nk_abcd1234_s3cr3ts3cr3t";
        let row = key_row(raw);

        assert!(row.matches(raw));
        assert!(!row.matches("nk_abcd1234_wrong"));
    }

    #[test]
    fn test_digest_is_never_serialized() {
        let row = key_row("nk_abcd1234_s3cr3ts3cr3t");
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains(&row.key_digest));
        assert!(json.contains("abcd1234"));
    }
}
