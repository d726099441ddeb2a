//! Argument parsing for commands and free-text spends

use thiserror::Error;
use crate::models::BalanceDocument;
use crate::utils::errors::MoneyCounterError;
use crate::utils::helpers::parse_amount;

/// Why user input could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("expected {expected} argument(s), got {got}")]
    WrongArgumentCount { expected: usize, got: usize },

    #[error("not a number: {0}")]
    InvalidNumber(String),

    #[error("invalid balance JSON: {0}")]
    InvalidJson(String),
}

impl From<InputError> for MoneyCounterError {
    fn from(err: InputError) -> Self {
        MoneyCounterError::InvalidInput(err.to_string())
    }
}

/// Parse `<number> <type>`
pub fn parse_limit_and_category(args: &str) -> Result<(f64, String), InputError> {
    let [number, category] = split_exact::<2>(args)?;
    let value = parse_amount(number).ok_or_else(|| InputError::InvalidNumber(number.to_string()))?;
    Ok((value, category.to_string()))
}

/// Parse a single `<type>` argument
pub fn parse_category(args: &str) -> Result<String, InputError> {
    let [category] = split_exact::<1>(args)?;
    Ok(category.to_string())
}

/// Parse a free-text spend message `<amount> <type>`
pub fn parse_spend(text: &str) -> Result<(f64, String), InputError> {
    parse_limit_and_category(text)
}

/// Parse a JSON object of category to `{limit, balance}`
pub fn parse_custom_document(args: &str) -> Result<BalanceDocument, InputError> {
    serde_json::from_str(args.trim()).map_err(|e| InputError::InvalidJson(e.to_string()))
}

fn split_exact<const N: usize>(args: &str) -> Result<[&str; N], InputError> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let got = parts.len();
    parts
        .try_into()
        .map_err(|_| InputError::WrongArgumentCount { expected: N, got })
}
