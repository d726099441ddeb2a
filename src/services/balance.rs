//! Balance service implementation
//!
//! Runs every balance operation as load, apply, save against the configured
//! [`DocumentStore`]. Without per-chat serialization two concurrent updates to
//! the same chat can race and the later save wins.

use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::debug;
use crate::config::Settings;
use crate::models::{BalanceDocument, BalanceRecord, OverdraftPolicy, ResetOutcome, UpsertOutcome};
use crate::state::{ChatLocks, DocumentStore};
use crate::utils::errors::{MoneyCounterError, Result};
use crate::utils::logging::{log_balance_operation, log_operation_error};

/// Balance operations for all chats
#[derive(Clone)]
pub struct BalanceService {
    store: Arc<dyn DocumentStore>,
    policy: OverdraftPolicy,
    locks: Option<Arc<ChatLocks>>,
}

impl BalanceService {
    /// Create a new BalanceService instance
    pub fn new(store: Arc<dyn DocumentStore>, policy: OverdraftPolicy) -> Self {
        Self {
            store,
            policy,
            locks: None,
        }
    }

    /// Create a service configured from settings
    pub fn from_settings(store: Arc<dyn DocumentStore>, settings: &Settings) -> Self {
        let service = Self::new(store, OverdraftPolicy::from_allow_negative(settings.balance.allow_negative));
        if settings.storage.serialize_updates {
            service.with_chat_locks()
        } else {
            service
        }
    }

    /// Serialize updates per chat
    pub fn with_chat_locks(mut self) -> Self {
        self.locks = Some(Arc::new(ChatLocks::new()));
        self
    }

    pub fn policy(&self) -> OverdraftPolicy {
        self.policy
    }

    /// Full document of a chat
    pub async fn get_all(&self, chat_id: ChatId) -> Result<BalanceDocument> {
        self.store.load(chat_id).await
    }

    /// One category of a chat
    pub async fn get_by_type(&self, chat_id: ChatId, category: &str) -> Result<BalanceRecord> {
        let document = self.store.load(chat_id).await?;
        document
            .get(category)
            .copied()
            .ok_or_else(|| MoneyCounterError::CategoryNotFound {
                category: category.to_string(),
            })
    }

    /// Set a category to a full record of `limit`
    pub async fn upsert(&self, chat_id: ChatId, category: &str, limit: f64) -> Result<UpsertOutcome> {
        let outcome = self
            .update(chat_id, "upsert", Some(category), |document| {
                let outcome = document.upsert(category, limit);
                Ok((outcome, outcome != UpsertOutcome::Unchanged))
            })
            .await?;

        log_balance_operation(chat_id, "upsert", Some(category), Some(&format!("{:?} limit={}", outcome, limit)));
        Ok(outcome)
    }

    /// Change the limit of an existing category
    pub async fn change_limit(&self, chat_id: ChatId, category: &str, limit: f64) -> Result<BalanceRecord> {
        let record = self
            .update(chat_id, "change_limit", Some(category), |document| {
                let record = document.change_limit(category, limit)?;
                Ok((record, true))
            })
            .await?;

        log_balance_operation(chat_id, "change_limit", Some(category), Some(&format!("limit={}", limit)));
        Ok(record)
    }

    /// Spend from a category and return its new balance
    pub async fn spend(&self, chat_id: ChatId, category: &str, amount: f64) -> Result<f64> {
        let policy = self.policy;
        let balance = self
            .update(chat_id, "spend", Some(category), |document| {
                let balance = document.spend(category, amount, policy)?;
                Ok((balance, true))
            })
            .await?;

        log_balance_operation(
            chat_id,
            "spend",
            Some(category),
            Some(&format!("amount={} balance={}", amount, balance)),
        );
        Ok(balance)
    }

    /// Remove a category and return its last record
    pub async fn delete(&self, chat_id: ChatId, category: &str) -> Result<BalanceRecord> {
        let removed = self
            .update(chat_id, "delete", Some(category), |document| {
                let removed = document.remove(category)?;
                Ok((removed, true))
            })
            .await?;

        log_balance_operation(chat_id, "delete", Some(category), None);
        Ok(removed)
    }

    /// Refill every category of a chat to its limit
    pub async fn reset_all(&self, chat_id: ChatId) -> Result<ResetOutcome> {
        let outcome = self
            .update(chat_id, "reset_all", None, |document| {
                let outcome = document.reset_all();
                let changed = matches!(outcome, ResetOutcome::Reset { .. });
                Ok((outcome, changed))
            })
            .await?;

        let details = match &outcome {
            ResetOutcome::Empty => "empty",
            ResetOutcome::Unchanged => "unchanged",
            ResetOutcome::Reset { .. } => "reset",
        };
        log_balance_operation(chat_id, "reset_all", None, Some(details));
        Ok(outcome)
    }

    /// Replace the whole document of a chat
    pub async fn replace_document(&self, chat_id: ChatId, document: BalanceDocument) -> Result<()> {
        let categories = document.len();
        self.update(chat_id, "replace_document", None, move |current| {
            let changed = *current != document;
            *current = document;
            Ok(((), changed))
        })
        .await?;

        log_balance_operation(
            chat_id,
            "replace_document",
            None,
            Some(&format!("categories={}", categories)),
        );
        Ok(())
    }

    /// Load, apply and save if the operation reports a change
    async fn update<T, F>(&self, chat_id: ChatId, operation: &str, category: Option<&str>, apply: F) -> Result<T>
    where
        F: FnOnce(&mut BalanceDocument) -> Result<(T, bool)>,
    {
        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(chat_id).await),
            None => None,
        };

        let result = async {
            let mut document = self.store.load(chat_id).await?;
            let (value, changed) = apply(&mut document)?;
            if changed {
                self.store.save(chat_id, &document).await?;
            } else {
                debug!(chat_id = chat_id.0, operation = operation, category = category, "Nothing to save");
            }
            Ok(value)
        }
        .await;

        if let Err(ref e) = result {
            log_operation_error(chat_id, operation, e);
        }
        result
    }
}

impl std::fmt::Debug for BalanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceService")
            .field("backend", &self.store.backend_name())
            .field("policy", &self.policy)
            .field("serialized", &self.locks.is_some())
            .finish()
    }
}
