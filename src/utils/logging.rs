//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the money-counter bot.

use std::path::Path;
use teloxide::types::ChatId;
use tracing::{info, warn, error, debug, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
};
use crate::config::{LogFormat, LoggingConfig};
use crate::utils::errors::{ErrorSeverity, MoneyCounterError, Result};

/// Initialize logging based on configuration.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// flushes the file writer and must be kept alive until shutdown.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(Path::new(dir), "money-counter.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(format_layer(config.format, non_blocking, false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(format_layer(config.format, std::io::stdout, true))
        .with(file_layer)
        .try_init()
        .map_err(|e| MoneyCounterError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {} ({:?})", config.level, config.format);
    Ok(guard)
}

/// Text or JSON lines to `writer`
fn format_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_writer(writer);
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Log a balance operation with structured data
pub fn log_balance_operation(chat_id: ChatId, operation: &str, category: Option<&str>, details: Option<&str>) {
    info!(
        chat_id = chat_id.0,
        operation = operation,
        category = category,
        details = details,
        "Balance operation performed"
    );
}

/// Log a failed operation at a level matching the error severity
pub fn log_operation_error(chat_id: ChatId, operation: &str, err: &MoneyCounterError) {
    match err.severity() {
        ErrorSeverity::Info => debug!(
            chat_id = chat_id.0,
            operation = operation,
            error = %err,
            "Operation rejected"
        ),
        ErrorSeverity::Warning => warn!(
            chat_id = chat_id.0,
            operation = operation,
            error = %err,
            "Operation rejected"
        ),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(
            chat_id = chat_id.0,
            operation = operation,
            error = %err,
            recoverable = err.is_recoverable(),
            "Operation failed"
        ),
    }
}

/// Log storage round-trips
pub fn log_storage_operation(backend: &str, operation: &str, chat_id: ChatId, success: bool) {
    if success {
        debug!(
            backend = backend,
            operation = operation,
            chat_id = chat_id.0,
            "Storage operation completed"
        );
    } else {
        error!(
            backend = backend,
            operation = operation,
            chat_id = chat_id.0,
            "Storage operation failed"
        );
    }
}
