//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Message handlers for free-text spend requests

pub mod commands;
pub mod messages;
pub mod parsing;
pub mod replies;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use messages::handle_message;
