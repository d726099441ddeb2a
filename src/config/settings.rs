//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from an optional config file and environment variables.

use serde::{Deserialize, Serialize};

/// Legacy environment variable carrying the bot token
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_KEY";

/// Legacy environment variable carrying the public webhook URL
pub const WEBHOOK_ENV_VAR: &str = "WEB_HOOK_HOST";

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub balance: BalanceConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
    pub webhook_url: Option<String>,
    pub webhook_listen: String,
    pub webhook_port: u16,
}

/// Which backend keeps the per-chat balance documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Pinned,
    Redis,
    Memory,
}

/// Balance storage configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub redis: RedisConfig,
    /// Serialize read-modify-write cycles per chat inside this process
    pub serialize_updates: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
}

/// Balance rules
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Allow spends that take a balance below zero
    pub allow_negative: bool,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("MONEY_COUNTER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("bot.token", non_empty_env(TOKEN_ENV_VAR))?
            .set_override_option("bot.webhook_url", non_empty_env(WEBHOOK_ENV_VAR))?
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.normalize();
        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::MoneyCounterError> {
        super::validation::validate_settings(self)
    }

    /// Webhook URL if webhook mode is configured
    pub fn webhook_url(&self) -> Option<&str> {
        self.bot.webhook_url.as_deref()
    }

    fn normalize(&mut self) {
        if self
            .bot
            .webhook_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.bot.webhook_url = None;
        }
        self.bot.token = self.bot.token.trim().to_string();
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            webhook_url: None,
            webhook_listen: "0.0.0.0".to_string(),
            webhook_port: 5000,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            prefix: "money_counter:".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file_path: None,
        }
    }
}
