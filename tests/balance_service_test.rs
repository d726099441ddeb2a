//! Balance service behavior over in-memory storage

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use helpers::*;
use money_counter::models::{BalanceRecord, OverdraftPolicy, ResetOutcome, UpsertOutcome};
use money_counter::services::BalanceService;
use money_counter::MoneyCounterError;
use teloxide::types::ChatId;

#[tokio::test]
async fn test_budget_walkthrough() {
    let service = memory_service(OverdraftPolicy::Reject);
    let chat = test_chat();

    assert!(service.get_all(chat).await.unwrap().is_empty());

    assert_eq!(service.upsert(chat, "food", 100.0).await.unwrap(), UpsertOutcome::Created);
    assert_eq!(
        service.get_by_type(chat, "food").await.unwrap(),
        BalanceRecord { limit: 100.0, balance: 100.0 }
    );

    assert_eq!(service.spend(chat, "food", 30.0).await.unwrap(), 70.0);
    assert_eq!(service.get_by_type(chat, "food").await.unwrap().balance, 70.0);

    let record = service.change_limit(chat, "food", 150.0).await.unwrap();
    assert_eq!(record, BalanceRecord { limit: 150.0, balance: 70.0 });

    match service.reset_all(chat).await.unwrap() {
        ResetOutcome::Reset { old, new } => {
            assert_eq!(old.get("food").unwrap().balance, 70.0);
            assert_eq!(new.get("food").unwrap().balance, 150.0);
        }
        other => panic!("unexpected reset outcome: {:?}", other),
    }
    assert_eq!(
        service.get_by_type(chat, "food").await.unwrap(),
        BalanceRecord { limit: 150.0, balance: 150.0 }
    );
}

#[tokio::test]
async fn test_change_limit_on_missing_category_leaves_document() {
    let (service, store) = counting_service(OverdraftPolicy::Reject);
    let chat = test_chat();
    service.upsert(chat, "food", 100.0).await.unwrap();
    let before = service.get_all(chat).await.unwrap();

    assert_matches!(
        service.change_limit(chat, "rent", 10.0).await,
        Err(MoneyCounterError::CategoryNotFound { category }) if category == "rent"
    );
    assert_eq!(service.get_all(chat).await.unwrap(), before);
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_spend_on_missing_category_does_not_write() {
    let (service, store) = counting_service(OverdraftPolicy::Allow);

    assert_matches!(
        service.spend(test_chat(), "food", 5.0).await,
        Err(MoneyCounterError::CategoryNotFound { .. })
    );
    assert_eq!(store.saves(), 0);
    assert!(service.get_all(test_chat()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overdraft_rejected_by_default() {
    let service = memory_service(OverdraftPolicy::Reject);
    let chat = test_chat();
    service.upsert(chat, "fun", 20.0).await.unwrap();

    assert_matches!(
        service.spend(chat, "fun", 25.0).await,
        Err(MoneyCounterError::InsufficientFunds { balance, .. }) if balance == 20.0
    );
    assert_eq!(service.get_by_type(chat, "fun").await.unwrap().balance, 20.0);
}

#[tokio::test]
async fn test_overdraft_allowed_when_configured() {
    let service = memory_service(OverdraftPolicy::Allow);
    let chat = test_chat();
    service.upsert(chat, "fun", 20.0).await.unwrap();

    assert_eq!(service.spend(chat, "fun", 25.0).await.unwrap(), -5.0);
    assert_eq!(service.get_by_type(chat, "fun").await.unwrap().balance, -5.0);
}

#[tokio::test]
async fn test_reset_twice_reports_no_changes() {
    let service = memory_service(OverdraftPolicy::Reject);
    let chat = test_chat();

    assert_eq!(service.reset_all(chat).await.unwrap(), ResetOutcome::Empty);

    service.upsert(chat, "food", 100.0).await.unwrap();
    service.upsert(chat, "fun", 50.0).await.unwrap();
    service.spend(chat, "food", 10.0).await.unwrap();

    assert_matches!(service.reset_all(chat).await.unwrap(), ResetOutcome::Reset { .. });
    assert_eq!(service.reset_all(chat).await.unwrap(), ResetOutcome::Unchanged);
}

#[tokio::test]
async fn test_delete_twice_fails_second_time() {
    let service = memory_service(OverdraftPolicy::Reject);
    let chat = test_chat();
    service.upsert(chat, "food", 100.0).await.unwrap();

    assert_eq!(service.delete(chat, "food").await.unwrap(), BalanceRecord::full(100.0));
    assert_matches!(
        service.get_by_type(chat, "food").await,
        Err(MoneyCounterError::CategoryNotFound { .. })
    );
    assert_matches!(
        service.delete(chat, "food").await,
        Err(MoneyCounterError::CategoryNotFound { .. })
    );
}

#[tokio::test]
async fn test_unchanged_upsert_skips_write() {
    let (service, store) = counting_service(OverdraftPolicy::Reject);
    let chat = test_chat();

    service.upsert(chat, "food", 100.0).await.unwrap();
    assert_eq!(store.saves(), 1);

    assert_eq!(service.upsert(chat, "food", 100.0).await.unwrap(), UpsertOutcome::Unchanged);
    assert_eq!(store.saves(), 1);

    service.spend(chat, "food", 1.0).await.unwrap();
    assert_eq!(service.upsert(chat, "food", 100.0).await.unwrap(), UpsertOutcome::Updated);
    assert_eq!(store.saves(), 3);
}

#[tokio::test]
async fn test_replace_document() {
    let service = memory_service(OverdraftPolicy::Reject);
    let chat = test_chat();
    service.upsert(chat, "old", 1.0).await.unwrap();

    let document = money_counter::handlers::parsing::parse_custom_document(
        r#"{"groceries": {"limit": 100, "balance": 50}}"#,
    )
    .unwrap();
    service.replace_document(chat, document).await.unwrap();

    let stored = service.get_all(chat).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.get("groceries"), Some(&BalanceRecord { limit: 100.0, balance: 50.0 }));
}

#[tokio::test]
async fn test_chats_are_independent() {
    let service = memory_service(OverdraftPolicy::Reject);
    service.upsert(ChatId(1), "food", 10.0).await.unwrap();

    assert!(service.get_all(ChatId(2)).await.unwrap().is_empty());
    assert_matches!(
        service.spend(ChatId(2), "food", 1.0).await,
        Err(MoneyCounterError::CategoryNotFound { .. })
    );
}

#[tokio::test]
async fn test_chat_locks_prevent_lost_updates() {
    init_test_env();
    let store = Arc::new(CountingStore::new());
    let service = Arc::new(
        BalanceService::new(store.clone(), OverdraftPolicy::Reject).with_chat_locks(),
    );
    let chat = test_chat();
    service.upsert(chat, "food", 100.0).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.spend(chat, "food", 1.0).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(service.get_by_type(chat, "food").await.unwrap().balance, 80.0);
    assert_eq!(store.saves(), 21);
}

#[tokio::test]
async fn test_spend_out_of_range_keeps_stored_document() {
    let (service, store) = counting_service(OverdraftPolicy::Reject);
    let chat = test_chat();
    service.upsert(chat, "food", 1e308).await.unwrap();
    service.upsert(chat, "rent", 500.0).await.unwrap();
    let before = service.get_all(chat).await.unwrap();

    assert_matches!(
        service.spend(chat, "food", -1e308).await,
        Err(MoneyCounterError::BalanceOutOfRange { category, .. }) if category == "food"
    );
    assert_eq!(store.saves(), 2);

    let after = service.get_all(chat).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(after.get("rent"), Some(&BalanceRecord::full(500.0)));
}
