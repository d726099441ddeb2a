//! In-process balance store

use std::collections::HashMap;
use async_trait::async_trait;
use teloxide::types::ChatId;
use tokio::sync::RwLock;
use crate::models::BalanceDocument;
use crate::utils::errors::Result;
use super::store::DocumentStore;

/// Documents kept in memory; lost on restart
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<ChatId, BalanceDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with a stored document
    pub async fn chat_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, chat_id: ChatId) -> Result<BalanceDocument> {
        Ok(self
            .documents
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, chat_id: ChatId, document: &BalanceDocument) -> Result<()> {
        self.documents.write().await.insert(chat_id, document.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
