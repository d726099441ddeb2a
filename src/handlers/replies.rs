//! User-facing reply texts

use crate::models::{BalanceDocument, BalanceRecord};
use crate::utils::helpers::format_amount;

pub const HELP_TEXT: &str = "Available commands:\n\
    /start - Welcome message and basic information.\n\
    /help - Show this help message.\n\
    /get_all_balance_info - Get full info about balance.\n\
    /get_balance <type> - Get info about one balance.\n\
    /upsert_balance <limit> <type> - Set the current balance to the specified limit.\n\
    /change_limit <limit> <type> - Change limit for balance.\n\
    /delete_balance <type> - Delete balance with type.\n\
    /reset_limits - Reset all balances.\n\
    /set_custom_json_balance <json> - Set custom json balance.\n\
    Simply send a message with a number and type to count that amount and update the balance.";

pub const START_HINT: &str =
    "I can help you keep track of your balance in this chat. Use /help to see the available commands.";

pub const NO_BALANCES: &str = "No balances found.";
pub const RESET_NO_CHANGES: &str = "No changes: all balances are already at their limits.";
pub const CUSTOM_JSON_SET: &str = "Custom JSON balance set successfully.";

pub const UPSERT_USAGE: &str = "Please provide two arguments: <limit> <type>.";
pub const CHANGE_LIMIT_USAGE: &str = "Please provide two arguments: <new_limit> <type>.";
pub const CATEGORY_USAGE: &str = "Please provide one argument: <type>.";
pub const LIMIT_NOT_A_NUMBER: &str = "Limit must be a number.";
pub const SPEND_USAGE: &str = "Please send a message with a number and type, e.g., '50 groceries'.";
pub const SPEND_NOT_A_NUMBER: &str =
    "Please send a valid number followed by the type, e.g., '50 groceries'.";
pub const CUSTOM_JSON_USAGE: &str =
    "Please send a valid JSON string, e.g., '{\"groceries\": {\"limit\": 100, \"balance\": 50}}'.";

pub const FETCH_FAILED: &str = "An error occurred while fetching balance information.";
pub const UPSERT_FAILED: &str = "An error occurred while setting the balance.";
pub const CHANGE_LIMIT_FAILED: &str = "An error occurred while changing the limit.";
pub const DELETE_FAILED: &str = "An error occurred while deleting the balance.";
pub const RESET_FAILED: &str = "An error occurred while resetting the limits.";
pub const REQUEST_FAILED: &str = "An error occurred while processing your request.";

pub fn greeting(mention_html: &str) -> String {
    format!("Hi {}! Welcome to the Balance Bot.", mention_html)
}

/// `type: balance / limit` lines followed by the totals
pub fn balance_lines(document: &BalanceDocument) -> String {
    let mut text = String::new();
    for (category, record) in document.iter() {
        text.push_str(&record_line(category, record));
        text.push('\n');
    }
    let totals = document.totals();
    text.push_str(&format!(
        "\nTotal: {} / {}",
        format_amount(totals.balance),
        format_amount(totals.limit)
    ));
    text
}

pub fn record_line(category: &str, record: &BalanceRecord) -> String {
    format!(
        "{}: {} / {}",
        category,
        format_amount(record.balance),
        format_amount(record.limit)
    )
}

pub fn balance_info(document: &BalanceDocument) -> String {
    format!("Balance info:\n{}", balance_lines(document))
}

pub fn reset_done(old: &BalanceDocument) -> String {
    format!(
        "Old balances:\n{}\nBalances have been reset to their limits.",
        balance_lines(old)
    )
}

pub fn balance_set(category: &str, limit: f64) -> String {
    format!("Balance for '{}' set to {}.", category, format_amount(limit))
}

pub fn balance_unchanged(category: &str, limit: f64) -> String {
    format!("Balance for '{}' is already set to {}.", category, format_amount(limit))
}

pub fn limit_changed(category: &str, record: &BalanceRecord) -> String {
    format!(
        "Limit for '{}' changed to {}. Current balance is {}.",
        category,
        format_amount(record.limit),
        format_amount(record.balance)
    )
}

pub fn balance_deleted(category: &str) -> String {
    format!("Balance for '{}' deleted.", category)
}

pub fn not_found(category: &str) -> String {
    format!("No balance found for '{}'.", category)
}

pub fn insufficient_funds(category: &str, balance: f64, amount: f64) -> String {
    format!(
        "Insufficient funds for '{}': current balance is {}, cannot spend {}.",
        category,
        format_amount(balance),
        format_amount(amount)
    )
}

pub fn out_of_range(category: &str, amount: f64) -> String {
    format!(
        "Cannot spend {} for '{}': the balance would be out of range.",
        format_amount(amount),
        category
    )
}

pub fn spent(category: &str, amount: f64, balance: f64) -> String {
    format!(
        "Spent {} for '{}'. Current balance is {}.",
        format_amount(amount),
        category,
        format_amount(balance)
    )
}
