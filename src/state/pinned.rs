//! Pinned-message balance store
//!
//! Keeps the chat's document in the text of a pinned message:
//! a marker line followed by the document JSON. Saving edits that message
//! when it exists, otherwise a new message is sent and pinned.

use async_trait::async_trait;
use teloxide::{prelude::*, types::{ChatId, Message}};
use tracing::{debug, info, warn};
use crate::models::BalanceDocument;
use crate::utils::errors::Result;
use crate::utils::logging::log_storage_operation;
use super::store::DocumentStore;

/// First line of every message that carries balance data
pub const DATA_MARKER: &str = "Data for money-counter";

const BACKEND: &str = "pinned";

/// Render a document as pinned message text
pub fn encode_pinned_text(document: &BalanceDocument) -> Result<String> {
    Ok(format!("{}\n{}", DATA_MARKER, serde_json::to_string(document)?))
}

/// Whether a message text carries balance data
pub fn has_marker(text: &str) -> bool {
    text.contains(DATA_MARKER)
}

/// Extract the document from pinned message text.
///
/// `None` when the marker is missing, nothing follows the first line, or the
/// JSON does not describe a balance document.
pub fn decode_pinned_text(text: &str) -> Option<BalanceDocument> {
    if !has_marker(text) {
        return None;
    }
    let (_, json) = text.split_once('\n')?;
    serde_json::from_str(json).ok()
}

/// Store backed by the chat's pinned message
#[derive(Clone)]
pub struct PinnedMessageStore {
    bot: Bot,
}

impl PinnedMessageStore {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Currently pinned message, if it carries balance data
    async fn pinned_data_message(&self, chat_id: ChatId) -> Result<Option<Message>> {
        let chat = self.bot.get_chat(chat_id).await.inspect_err(|_| {
            log_storage_operation(BACKEND, "get_chat", chat_id, false);
        })?;

        let pinned = chat
            .pinned_message
            .map(|message| *message)
            .filter(|message| message.text().is_some_and(has_marker));

        debug!(chat_id = chat_id.0, has_data = pinned.is_some(), "Fetched pinned message");
        Ok(pinned)
    }
}

impl std::fmt::Debug for PinnedMessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinnedMessageStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentStore for PinnedMessageStore {
    async fn load(&self, chat_id: ChatId) -> Result<BalanceDocument> {
        let Some(message) = self.pinned_data_message(chat_id).await? else {
            return Ok(BalanceDocument::new());
        };
        let text = message.text().unwrap_or_default();

        let document = decode_pinned_text(text).unwrap_or_else(|| {
            warn!(
                chat_id = chat_id.0,
                message_id = message.id.0,
                "Pinned balance data is malformed, treating it as empty"
            );
            BalanceDocument::new()
        });
        log_storage_operation(BACKEND, "load", chat_id, true);
        Ok(document)
    }

    async fn save(&self, chat_id: ChatId, document: &BalanceDocument) -> Result<()> {
        let text = encode_pinned_text(document)?;

        match self.pinned_data_message(chat_id).await? {
            Some(message) if message.text() == Some(text.as_str()) => {
                debug!(chat_id = chat_id.0, "Pinned balance data already up to date");
            }
            Some(message) => {
                self.bot
                    .edit_message_text(chat_id, message.id, text)
                    .await
                    .inspect_err(|_| log_storage_operation(BACKEND, "edit", chat_id, false))?;
                log_storage_operation(BACKEND, "edit", chat_id, true);
            }
            None => {
                let sent = self.bot.send_message(chat_id, text).await?;
                self.bot
                    .pin_chat_message(chat_id, sent.id)
                    .disable_notification(true)
                    .await
                    .inspect_err(|_| log_storage_operation(BACKEND, "pin", chat_id, false))?;
                info!(chat_id = chat_id.0, message_id = sent.id.0, "Pinned new balance data message");
            }
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pinned_text() {
        let mut doc = BalanceDocument::new();
        doc.upsert("food", 100.0);

        let text = encode_pinned_text(&doc).unwrap();
        assert_eq!(text, "Data for money-counter\n{\"food\":{\"limit\":100.0,\"balance\":100.0}}");
        assert_eq!(decode_pinned_text(&text), Some(doc));
    }

    #[test]
    fn test_decode_rejects_foreign_or_broken_text() {
        assert_eq!(decode_pinned_text("Meeting at 5pm"), None);
        assert_eq!(decode_pinned_text("Data for money-counter"), None);
        assert_eq!(decode_pinned_text("Data for money-counter\n{broken"), None);
    }

    #[test]
    fn test_decode_empty_object() {
        let doc = decode_pinned_text("Data for money-counter\n{}").unwrap();
        assert!(doc.is_empty());
    }
}
