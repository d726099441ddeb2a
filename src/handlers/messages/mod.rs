//! Message handlers module
//!
//! Non-command text messages are spend requests: `<amount> <type>`.
//! Argument-less commands sent with extra words end up here too and still run.

use std::sync::Arc;
use teloxide::{Bot, types::Message, prelude::*, utils::command::BotCommands};
use tracing::{debug, info};
use crate::handlers::commands::{self, balance, Command};
use crate::services::BalanceService;
use crate::utils::errors::Result;
use crate::utils::helpers::truncate_text;

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    bot_username: &str,
    service: Arc<BalanceService>,
) -> Result<()> {
    let chat_id = msg.chat.id;

    if let Some(cmd) = msg.text().and_then(|text| command_ignoring_args(text, bot_username)) {
        debug!(chat_id = chat_id.0, command = cmd.name(), "Ignoring extra command arguments");
        return commands::handle_command(bot, msg, cmd, service).await;
    }

    let Some(text) = spend_text(&msg) else {
        debug!(chat_id = chat_id.0, message_id = msg.id.0, "Ignoring non-spend message");
        return Ok(());
    };

    info!(chat_id = chat_id.0, text = %truncate_text(text, 64), "Spend request received");

    let reply = balance::spend(&service, chat_id, text).await;
    bot.send_message(chat_id, reply).await?;
    Ok(())
}

/// Text of a message that should be treated as a spend request
fn spend_text(msg: &Message) -> Option<&str> {
    msg.text()
        .map(str::trim)
        .filter(|text| is_spend_text(text))
}

/// An argument-less command whose trailing words should be ignored.
///
/// Commands that take arguments always parse on their own, so only the bare
/// ones can reach this point.
pub fn command_ignoring_args(text: &str, bot_username: &str) -> Option<Command> {
    let head = text.split_whitespace().next()?;
    match Command::parse(head, bot_username).ok()? {
        cmd @ (Command::Start | Command::Help | Command::GetAllBalanceInfo | Command::ResetLimits) => Some(cmd),
        _ => None,
    }
}

/// Anything that is not empty and not a command
pub fn is_spend_text(text: &str) -> bool {
    !text.is_empty() && !text.starts_with('/')
}
