//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{MoneyCounterError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(MoneyCounterError::Config(format!(
            "{} is not set in environment variables",
            super::settings::TOKEN_ENV_VAR
        )));
    }

    if let Some(ref webhook_url) = config.webhook_url {
        let parsed = url::Url::parse(webhook_url)?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(MoneyCounterError::Config(format!(
                "Webhook URL must be http(s), got: {}",
                parsed.scheme()
            )));
        }

        if config.webhook_listen.parse::<std::net::IpAddr>().is_err() {
            return Err(MoneyCounterError::Config(format!(
                "Invalid webhook listen address: {}",
                config.webhook_listen
            )));
        }
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.backend == StorageBackend::Redis && config.redis.url.is_empty() {
        return Err(MoneyCounterError::Config(
            "Redis URL is required for the redis storage backend".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MoneyCounterError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(MoneyCounterError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
