//! Start command handler

use teloxide::{Bot, types::{Message, ParseMode, User}, prelude::*, utils::html};
use tracing::debug;
use crate::handlers::replies;
use crate::utils::errors::Result;

/// Handle /start command: greet the sender, then point at /help
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id;

    let greeting = match msg.from.as_ref() {
        Some(user) => replies::greeting(&mention_html(user)),
        None => replies::greeting("there"),
    };

    bot.send_message(chat_id, greeting)
        .parse_mode(ParseMode::Html)
        .await?;
    bot.send_message(chat_id, replies::START_HINT).await?;

    debug!(chat_id = chat_id.0, "Sent welcome message");
    Ok(())
}

/// HTML link to the user's profile labelled with their escaped full name
pub fn mention_html(user: &User) -> String {
    format!("<a href=\"{}\">{}</a>", user.url(), html::escape(&user.full_name()))
}
