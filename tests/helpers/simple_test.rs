//! Simple test infrastructure for basic testing
//!
//! Services over in-memory storage, plus a store wrapper that counts writes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use async_trait::async_trait;
use money_counter::models::{BalanceDocument, OverdraftPolicy};
use money_counter::services::BalanceService;
use money_counter::state::{DocumentStore, MemoryDocumentStore};
use teloxide::types::ChatId;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("money_counter=debug")
            .try_init();
    });
}

/// Chat used by most tests
pub fn test_chat() -> ChatId {
    ChatId(super::test_chat_id())
}

/// Memory store that counts loads and saves
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryDocumentStore,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn load(&self, chat_id: ChatId) -> money_counter::Result<BalanceDocument> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(chat_id).await
    }

    async fn save(&self, chat_id: ChatId, document: &BalanceDocument) -> money_counter::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        // Yield between load and save so concurrent updates can interleave
        tokio::task::yield_now().await;
        self.inner.save(chat_id, document).await
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

/// Service over a fresh in-memory store
pub fn memory_service(policy: OverdraftPolicy) -> BalanceService {
    init_test_env();
    BalanceService::new(Arc::new(MemoryDocumentStore::new()), policy)
}

/// Service over a counting store, returning both
pub fn counting_service(policy: OverdraftPolicy) -> (BalanceService, Arc<CountingStore>) {
    init_test_env();
    let store = Arc::new(CountingStore::new());
    let service = BalanceService::new(store.clone(), policy);
    (service, store)
}
