//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the
//! notification service. All entities map directly to their
//! corresponding database tables.
//!
//! ## Core Entities
//!
//! - **User**: Admin panel account with authentication data
//! - **Group**: A Telegram chat the bot is a member of
//! - **Channel**: A named notification route pointing at a group
//! - **ApiKey**: Credential external callers use to send notifications
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod api_key;
mod channel;
mod group;
mod user;

// Re-export User entity and related types
pub use user::{User, UserRepository, UserRole};

// Re-export Group entity and related types
pub use group::{Group, GroupRepository};

// Re-export Channel entity and related types
pub use channel::{Channel, ChannelRepository};

// Re-export ApiKey entity and related types
pub use api_key::{ApiKey, ApiKeyRepository, KEY_SCHEME};
