//! Error handling for money-counter
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the money-counter bot
#[derive(Error, Debug)]
pub enum MoneyCounterError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Category not found: {category}")]
    CategoryNotFound { category: String },

    #[error("Insufficient funds in {category}: balance {balance}, requested {amount}")]
    InsufficientFunds {
        category: String,
        balance: f64,
        amount: f64,
    },

    #[error("Balance of {category} would leave the representable range after spending {amount}")]
    BalanceOutOfRange { category: String, amount: f64 },
}

/// Result type alias for money-counter operations
pub type Result<T> = std::result::Result<T, MoneyCounterError>;

impl MoneyCounterError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MoneyCounterError::Telegram(_) => true,
            MoneyCounterError::Redis(_) => true,
            MoneyCounterError::Io(_) => true,
            MoneyCounterError::Serialization(_) => false,
            MoneyCounterError::Config(_) => false,
            MoneyCounterError::ConfigLoad(_) => false,
            MoneyCounterError::UrlParse(_) => false,
            MoneyCounterError::InvalidInput(_) => false,
            MoneyCounterError::CategoryNotFound { .. } => false,
            MoneyCounterError::InsufficientFunds { .. } => false,
            MoneyCounterError::BalanceOutOfRange { .. } => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MoneyCounterError::Config(_) => ErrorSeverity::Critical,
            MoneyCounterError::ConfigLoad(_) => ErrorSeverity::Critical,
            MoneyCounterError::InvalidInput(_) => ErrorSeverity::Info,
            MoneyCounterError::CategoryNotFound { .. } => ErrorSeverity::Warning,
            MoneyCounterError::InsufficientFunds { .. } => ErrorSeverity::Warning,
            MoneyCounterError::BalanceOutOfRange { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error was caused by what the user sent rather than by the bot
    pub fn is_user_error(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Info | ErrorSeverity::Warning)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
