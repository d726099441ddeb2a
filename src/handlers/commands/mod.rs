//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;
pub mod balance;

use std::sync::Arc;
use teloxide::{Bot, types::{ChatId, Message}, prelude::*, utils::command::BotCommands};
use tracing::info;
use crate::utils::errors::Result;
use crate::services::BalanceService;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum Command {
    #[command(description = "Welcome message and basic information")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Get full info about balance")]
    GetAllBalanceInfo,
    #[command(description = "Get info about one balance: <type>")]
    GetBalance(String),
    #[command(description = "Set a balance to its limit: <limit> <type>")]
    UpsertBalance(String),
    #[command(description = "Change limit for balance: <limit> <type>")]
    ChangeLimit(String),
    #[command(description = "Delete balance: <type>")]
    DeleteBalance(String),
    #[command(description = "Reset all balances to their limits")]
    ResetLimits,
    #[command(description = "Replace all balances with JSON")]
    SetCustomJsonBalance(String),
}

impl Command {
    /// Command name as typed by users, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::GetAllBalanceInfo => "get_all_balance_info",
            Command::GetBalance(_) => "get_balance",
            Command::UpsertBalance(_) => "upsert_balance",
            Command::ChangeLimit(_) => "change_limit",
            Command::DeleteBalance(_) => "delete_balance",
            Command::ResetLimits => "reset_limits",
            Command::SetCustomJsonBalance(_) => "set_custom_json_balance",
        }
    }
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<BalanceService>,
) -> Result<()> {
    let chat_id = msg.chat.id;
    info!(chat_id = chat_id.0, command = cmd.name(), "Command received");

    let reply = match cmd {
        Command::Start => return start::handle_start(bot, msg).await,
        Command::Help => return help::handle_help(bot, msg).await,
        other => command_reply(&service, chat_id, other).await,
    };

    bot.send_message(chat_id, reply).await?;
    Ok(())
}

/// Reply text for a balance command. `/start` and `/help` are answered directly
/// by their handlers and yield their static text here.
pub async fn command_reply(service: &BalanceService, chat_id: ChatId, cmd: Command) -> String {
    match cmd {
        Command::Start => crate::handlers::replies::START_HINT.to_string(),
        Command::Help => crate::handlers::replies::HELP_TEXT.to_string(),
        Command::GetAllBalanceInfo => balance::get_all_balance_info(service, chat_id).await,
        Command::GetBalance(args) => balance::get_balance(service, chat_id, &args).await,
        Command::UpsertBalance(args) => balance::upsert_balance(service, chat_id, &args).await,
        Command::ChangeLimit(args) => balance::change_limit(service, chat_id, &args).await,
        Command::DeleteBalance(args) => balance::delete_balance(service, chat_id, &args).await,
        Command::ResetLimits => balance::reset_limits(service, chat_id).await,
        Command::SetCustomJsonBalance(args) => balance::set_custom_json_balance(service, chat_id, &args).await,
    }
}
