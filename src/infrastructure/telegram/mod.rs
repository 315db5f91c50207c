pub mod client;
pub mod manager;
pub mod types;

pub use client::{BotClient, BotError, SECRET_TOKEN_HEADER};
pub use manager::BotManager;
