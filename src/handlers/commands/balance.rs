//! Balance command handlers
//!
//! Each function runs one balance operation for a chat and returns the reply
//! text. Bad input is answered without touching the store.

use teloxide::types::ChatId;
use tracing::debug;
use crate::handlers::parsing::{self, InputError};
use crate::handlers::replies;
use crate::models::{ResetOutcome, UpsertOutcome};
use crate::services::BalanceService;
use crate::utils::errors::MoneyCounterError;
use crate::utils::logging::log_operation_error;

/// /get_all_balance_info
pub async fn get_all_balance_info(service: &BalanceService, chat_id: ChatId) -> String {
    match service.get_all(chat_id).await {
        Ok(document) if document.is_empty() => replies::NO_BALANCES.to_string(),
        Ok(document) => replies::balance_info(&document),
        Err(e) => failure_reply(&e, replies::FETCH_FAILED),
    }
}

/// /get_balance <type>
pub async fn get_balance(service: &BalanceService, chat_id: ChatId, args: &str) -> String {
    let category = match parsing::parse_category(args) {
        Ok(category) => category,
        Err(e) => return input_reply(chat_id, "get_balance", &e, replies::CATEGORY_USAGE, replies::CATEGORY_USAGE),
    };

    match service.get_by_type(chat_id, &category).await {
        Ok(record) => replies::record_line(&category, &record),
        Err(e) => failure_reply(&e, replies::FETCH_FAILED),
    }
}

/// /upsert_balance <limit> <type>
pub async fn upsert_balance(service: &BalanceService, chat_id: ChatId, args: &str) -> String {
    let (limit, category) = match parsing::parse_limit_and_category(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            return input_reply(chat_id, "upsert_balance", &e, replies::UPSERT_USAGE, replies::LIMIT_NOT_A_NUMBER)
        }
    };

    match service.upsert(chat_id, &category, limit).await {
        Ok(UpsertOutcome::Unchanged) => replies::balance_unchanged(&category, limit),
        Ok(_) => replies::balance_set(&category, limit),
        Err(e) => failure_reply(&e, replies::UPSERT_FAILED),
    }
}

/// /change_limit <limit> <type>
pub async fn change_limit(service: &BalanceService, chat_id: ChatId, args: &str) -> String {
    let (limit, category) = match parsing::parse_limit_and_category(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            return input_reply(chat_id, "change_limit", &e, replies::CHANGE_LIMIT_USAGE, replies::LIMIT_NOT_A_NUMBER)
        }
    };

    match service.change_limit(chat_id, &category, limit).await {
        Ok(record) => replies::limit_changed(&category, &record),
        Err(e) => failure_reply(&e, replies::CHANGE_LIMIT_FAILED),
    }
}

/// /delete_balance <type>
pub async fn delete_balance(service: &BalanceService, chat_id: ChatId, args: &str) -> String {
    let category = match parsing::parse_category(args) {
        Ok(category) => category,
        Err(e) => return input_reply(chat_id, "delete_balance", &e, replies::CATEGORY_USAGE, replies::CATEGORY_USAGE),
    };

    match service.delete(chat_id, &category).await {
        Ok(_) => replies::balance_deleted(&category),
        Err(e) => failure_reply(&e, replies::DELETE_FAILED),
    }
}

/// /reset_limits
pub async fn reset_limits(service: &BalanceService, chat_id: ChatId) -> String {
    match service.reset_all(chat_id).await {
        Ok(ResetOutcome::Empty) => replies::NO_BALANCES.to_string(),
        Ok(ResetOutcome::Unchanged) => replies::RESET_NO_CHANGES.to_string(),
        Ok(ResetOutcome::Reset { old, .. }) => replies::reset_done(&old),
        Err(e) => failure_reply(&e, replies::RESET_FAILED),
    }
}

/// /set_custom_json_balance <json>
pub async fn set_custom_json_balance(service: &BalanceService, chat_id: ChatId, args: &str) -> String {
    let document = match parsing::parse_custom_document(args) {
        Ok(document) => document,
        Err(e) => {
            return input_reply(chat_id, "set_custom_json_balance", &e, replies::CUSTOM_JSON_USAGE, replies::CUSTOM_JSON_USAGE)
        }
    };

    match service.replace_document(chat_id, document).await {
        Ok(()) => replies::CUSTOM_JSON_SET.to_string(),
        Err(e) => failure_reply(&e, replies::REQUEST_FAILED),
    }
}

/// Free text `<amount> <type>`
pub async fn spend(service: &BalanceService, chat_id: ChatId, text: &str) -> String {
    let (amount, category) = match parsing::parse_spend(text) {
        Ok(parsed) => parsed,
        Err(e) => return input_reply(chat_id, "spend", &e, replies::SPEND_USAGE, replies::SPEND_NOT_A_NUMBER),
    };
    debug!(chat_id = chat_id.0, amount = amount, category = %category, "Parsed spend request");

    match service.spend(chat_id, &category, amount).await {
        Ok(balance) => replies::spent(&category, amount, balance),
        Err(e) => failure_reply(&e, replies::REQUEST_FAILED),
    }
}

/// Reply for input that failed to parse
fn input_reply(chat_id: ChatId, operation: &str, err: &InputError, usage: &str, invalid: &str) -> String {
    log_operation_error(chat_id, operation, &MoneyCounterError::from(err.clone()));
    match err {
        InputError::WrongArgumentCount { .. } => usage.to_string(),
        InputError::InvalidNumber(_) | InputError::InvalidJson(_) => invalid.to_string(),
    }
}

/// Reply for a failed operation; internal failures get the generic text
fn failure_reply(err: &MoneyCounterError, generic: &str) -> String {
    match err {
        MoneyCounterError::CategoryNotFound { category } => replies::not_found(category),
        MoneyCounterError::InsufficientFunds { category, balance, amount } => {
            replies::insufficient_funds(category, *balance, *amount)
        }
        MoneyCounterError::BalanceOutOfRange { category, amount } => replies::out_of_range(category, *amount),
        _ => generic.to_string(),
    }
}
