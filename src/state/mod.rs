//! State management module
//!
//! This module handles persistence of per-chat balance documents

pub mod locks;
pub mod memory;
pub mod pinned;
pub mod redis;
pub mod store;

use std::sync::Arc;
use teloxide::Bot;
use tracing::info;
use crate::config::{StorageBackend, StorageConfig};
use crate::utils::errors::Result;

// Re-export commonly used state components
pub use locks::ChatLocks;
pub use memory::MemoryDocumentStore;
pub use pinned::{PinnedMessageStore, DATA_MARKER};
pub use self::redis::RedisDocumentStore;
pub use store::DocumentStore;

/// Build the configured document store
pub async fn build_store(config: &StorageConfig, bot: Bot) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StorageBackend::Pinned => Arc::new(PinnedMessageStore::new(bot)),
        StorageBackend::Redis => {
            let store = RedisDocumentStore::new(config.redis.clone()).await?;
            store.test_connection().await?;
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(MemoryDocumentStore::new()),
    };

    info!(backend = store.backend_name(), "Balance store ready");
    Ok(store)
}
