//! Per-chat update serialization
//!
//! Holding a chat's guard across load/apply/save keeps concurrent updates to
//! that chat from overwriting each other within this process. Entries nobody
//! holds or waits on are dropped on the next acquire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use teloxide::types::ChatId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct ChatLocks {
    locks: Mutex<HashMap<ChatId, Arc<AsyncMutex<()>>>>,
}

impl ChatLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `chat_id`
    pub async fn acquire(&self, chat_id: ChatId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|id, lock| *id == chat_id || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(chat_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of chats currently tracked
    pub fn tracked_chats(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
