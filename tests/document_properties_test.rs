//! Property tests for balance document operations

use money_counter::models::{BalanceDocument, OverdraftPolicy, ResetOutcome};
use money_counter::state::pinned::{decode_pinned_text, encode_pinned_text};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn amount() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn document() -> impl Strategy<Value = BalanceDocument> {
    prop::collection::vec((category(), amount(), amount()), 0..6).prop_map(|entries| {
        let mut document = BalanceDocument::new();
        for (name, limit, spent) in entries {
            document.upsert(&name, limit);
            let _ = document.spend(&name, spent, OverdraftPolicy::Allow);
        }
        document
    })
}

fn full_document() -> impl Strategy<Value = BalanceDocument> {
    prop::collection::vec((category(), amount()), 0..6).prop_map(|entries| {
        let mut document = BalanceDocument::new();
        for (name, limit) in entries {
            document.upsert(&name, limit);
        }
        document
    })
}

proptest! {
    #[test]
    fn upsert_fills_balance_to_limit(mut doc in document(), name in category(), limit in amount()) {
        doc.upsert(&name, limit);
        let record = doc.get(&name).unwrap();
        prop_assert_eq!(record.balance, limit);
        prop_assert_eq!(record.limit, limit);
    }

    #[test]
    fn spend_within_balance_subtracts(name in category(), limit in amount(), fraction in 0.0f64..=1.0) {
        let mut doc = BalanceDocument::new();
        doc.upsert(&name, limit);
        let amount = limit * fraction;

        let new_balance = doc.spend(&name, amount, OverdraftPolicy::Reject).unwrap();
        prop_assert_eq!(new_balance, limit - amount);
        prop_assert_eq!(doc.get(&name).unwrap().balance, new_balance);
    }

    #[test]
    fn missing_category_never_mutates(doc in document(), amount in amount(), limit in amount()) {
        let mut working = doc.clone();
        let name = "NOT-A-CATEGORY";

        prop_assert!(working.spend(name, amount, OverdraftPolicy::Allow).is_err());
        prop_assert!(working.change_limit(name, limit).is_err());
        prop_assert!(working.remove(name).is_err());
        prop_assert_eq!(working, doc);
    }

    #[test]
    fn reset_is_idempotent(mut doc in document()) {
        let first = doc.reset_all();
        for (_, record) in doc.iter() {
            prop_assert_eq!(record.balance, record.limit);
        }
        let second = doc.reset_all();

        if doc.is_empty() {
            prop_assert_eq!(first, ResetOutcome::Empty);
            prop_assert_eq!(second, ResetOutcome::Empty);
        } else {
            prop_assert_eq!(second, ResetOutcome::Unchanged);
        }
    }

    #[test]
    fn pinned_text_preserves_document(doc in full_document()) {
        let text = encode_pinned_text(&doc).unwrap();
        prop_assert_eq!(decode_pinned_text(&text), Some(doc));
    }
}
