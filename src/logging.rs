//! # Structured Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem.
//!
//! The library itself only emits events; applications (and test binaries) call
//! [`init_structured_logging`] once to install a subscriber. `RUST_LOG` always
//! wins over the environment-derived default level, and setting
//! `CAPTURE_LOG_FORMAT=json` switches the console output to JSON lines.

use crate::constants::env;
use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = std::env::var(env::LOG_FORMAT).is_ok_and(|format| format == "json");

        let console = if json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(std::io::stdout().is_terminal())
                .with_filter(filter)
                .boxed()
        };

        // Another subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(env::ENVIRONMENT)
        .or_else(|_| std::env::var(env::FALLBACK_ENVIRONMENT))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for registry operations
pub fn log_registry_operation(
    operation: &str,
    type_identifier: &str,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        type_identifier = %type_identifier,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}

/// Log a capture that failed, with the underlying cause
pub fn log_capture_failure(type_identifier: &str, error: &str, cause: Option<&str>) {
    tracing::warn!(
        type_identifier = %type_identifier,
        error = %error,
        cause = cause,
        timestamp = %Utc::now().to_rfc3339(),
        "CAPTURE_FAILED"
    );
}
