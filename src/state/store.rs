//! Balance document store abstraction
//!
//! Every backend keeps exactly one [`BalanceDocument`] per chat with plain
//! get/put semantics. Nothing here is transactional: the service performs a
//! load, applies the change and saves the whole document back.

use async_trait::async_trait;
use teloxide::types::ChatId;
use tracing::warn;
use crate::models::BalanceDocument;
use crate::utils::errors::Result;

/// Per-chat key-value storage of balance documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the chat's document. Missing or undecodable data yields an empty document.
    async fn load(&self, chat_id: ChatId) -> Result<BalanceDocument>;

    /// Replace the chat's document
    async fn save(&self, chat_id: ChatId, document: &BalanceDocument) -> Result<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Decode stored JSON, falling back to an empty document on malformed data
pub fn decode_json_lenient(chat_id: ChatId, backend: &str, raw: &str) -> BalanceDocument {
    match serde_json::from_str::<BalanceDocument>(raw) {
        Ok(document) => document,
        Err(e) => {
            warn!(
                chat_id = chat_id.0,
                backend = backend,
                error = %e,
                "Stored balance data is malformed, treating it as empty"
            );
            BalanceDocument::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json_lenient() {
        let doc = decode_json_lenient(ChatId(1), "test", r#"{"food":{"limit":10,"balance":4}}"#);
        assert_eq!(doc.get("food").unwrap().balance, 4.0);

        assert!(decode_json_lenient(ChatId(1), "test", "not json").is_empty());
        assert!(decode_json_lenient(ChatId(1), "test", r#"{"food": 3}"#).is_empty());
    }
}
