//! money-counter Telegram Bot
//!
//! Tracks per-chat spending balances across named budget categories.
//! Each chat's balances form one JSON document that is stored in the chat's
//! pinned message by default, or in Redis or memory when configured.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MoneyCounterError, Result};

// Re-export main components for easy access
pub use models::{BalanceDocument, BalanceRecord};
pub use services::BalanceService;
pub use state::DocumentStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
