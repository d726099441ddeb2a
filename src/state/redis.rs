//! Redis balance store
//!
//! Keeps each chat's document as a JSON string under
//! `{prefix}balances:{chat_id}`. Keys never expire.

use async_trait::async_trait;
use redis::AsyncCommands;
use teloxide::types::ChatId;
use tracing::{debug, error};
use crate::config::RedisConfig;
use crate::models::BalanceDocument;
use crate::utils::errors::Result;
use crate::utils::logging::log_storage_operation;
use super::store::{decode_json_lenient, DocumentStore};

const BACKEND: &str = "redis";

/// Redis-based balance storage
#[derive(Clone)]
pub struct RedisDocumentStore {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Redis configuration
    config: RedisConfig,
}

impl RedisDocumentStore {
    /// Create a new store and open the connection
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Get the Redis key for a chat's document
    fn document_key(&self, chat_id: ChatId) -> String {
        document_key(&self.config.prefix, chat_id)
    }
}

fn document_key(prefix: &str, chat_id: ChatId) -> String {
    format!("{}balances:{}", prefix, chat_id.0)
}

impl std::fmt::Debug for RedisDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDocumentStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn load(&self, chat_id: ChatId) -> Result<BalanceDocument> {
        let key = self.document_key(chat_id);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = match conn.get(&key).await {
            Ok(data) => data,
            Err(e) => {
                error!(chat_id = chat_id.0, key = %key, error = %e, "Failed to get balances from Redis");
                return Err(e.into());
            }
        };
        log_storage_operation(BACKEND, "load", chat_id, true);

        Ok(match serialized {
            Some(data) => decode_json_lenient(chat_id, BACKEND, &data),
            None => {
                debug!(chat_id = chat_id.0, key = %key, "No balances stored in Redis");
                BalanceDocument::new()
            }
        })
    }

    async fn save(&self, chat_id: ChatId, document: &BalanceDocument) -> Result<()> {
        let key = self.document_key(chat_id);
        let serialized = serde_json::to_string(document)?;
        let mut conn = self.connection_manager.clone();

        match conn.set::<_, _, ()>(&key, serialized).await {
            Ok(_) => {
                log_storage_operation(BACKEND, "save", chat_id, true);
                Ok(())
            }
            Err(e) => {
                error!(chat_id = chat_id.0, key = %key, error = %e, "Failed to save balances to Redis");
                Err(e.into())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
