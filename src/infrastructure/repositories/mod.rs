//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! This module provides concrete implementations of the repository traits
//! defined in the domain layer. Each repository handles data access for
//! a specific entity type.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - Admin account management
//! - **GroupRepository** - Registered Telegram chats
//! - **ChannelRepository** - Named notification routes
//! - **ApiKeyRepository** - Notification credentials
//!
//! Repositories are constructed per use from the pool currently
//! published by the database manager, so a reconfiguration that swaps
//! the pool is picked up on the next construction.

pub mod api_key_repository;
pub mod channel_repository;
pub mod group_repository;
pub mod user_repository;

// Re-export repository structs for convenience
pub use api_key_repository::PgApiKeyRepository;
pub use channel_repository::PgChannelRepository;
pub use group_repository::PgGroupRepository;
pub use user_repository::PgUserRepository;
