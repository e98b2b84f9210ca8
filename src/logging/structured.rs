//! Structured logging setup using tracing
//!
//! Console output goes to stderr so that `export` can keep stdout for the
//! JSON response. Optional rolling file logs are always JSON.
//!
//! # Example
//!
//! ```no_run
//! use cwl_export::logging::init_logging;
//! use cwl_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{ExportToolError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "cwl-export.log";

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LoggingGuard {
    fn new(
        file_guard: Option<WorkerGuard>,
        filter: Option<reload::Handle<EnvFilter, Registry>>,
    ) -> Self {
        Self {
            _file_guard: file_guard,
            filter,
        }
    }

    /// Switch to `level` once the configuration file has been read.
    ///
    /// No-op when `RUST_LOG` chose the filter.
    pub fn set_level(&self, level_str: &str) -> Result<()> {
        let level = parse_log_level(level_str)?;
        if let Some(handle) = &self.filter {
            handle.reload(level_filter(level)).map_err(|e| {
                ExportToolError::Configuration(format!("Failed to change log level: {}", e))
            })?;
        }
        Ok(())
    }
}

fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("cwl_export={}", level))
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `log_level_str` when set.
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `config` - Logging configuration
///
/// # Returns
///
/// A `LoggingGuard` that must be kept alive for the duration of the program
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;
    config.validate().map_err(ExportToolError::Configuration)?;

    let from_env = EnvFilter::try_from_default_env().ok();
    let reloadable = from_env.is_none();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| level_filter(log_level)));

    let mut layers = Vec::new();

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };
    layers.push(console_layer);

    let file_guard = if config.local_enabled {
        let rotation = match config.local_rotation.as_str() {
            "hourly" => Rotation::HOURLY,
            _ => Rotation::DAILY,
        };

        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            ExportToolError::Configuration(format!(
                "Failed to create log directory {}: {}",
                config.local_path, e
            ))
        })?;

        let file_appender = RollingFileAppender::new(rotation, &config.local_path, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(non_blocking);

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| {
            ExportToolError::Configuration(format!("Failed to initialize logging: {}", e))
        })?;

    tracing::debug!(
        json = config.json,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard, reloadable.then_some(handle)))
}

/// Parse log level from string
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ExportToolError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("debug", Level::DEBUG)]
    #[test_case("INFO", Level::INFO)]
    #[test_case("Warn", Level::WARN)]
    #[test_case("error", Level::ERROR)]
    fn test_parse_log_level_valid(input: &str, expected: Level) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_init_logging_rejects_bad_rotation() {
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..LoggingConfig::default()
        };
        let result = init_logging("info", &config);
        assert!(matches!(result, Err(ExportToolError::Configuration(_))));
    }

    #[test]
    fn test_logging_guard_creation() {
        let guard = LoggingGuard::new(None, None);
        assert!(guard.set_level("debug").is_ok());
        assert!(guard.set_level("loud").is_err());
    }
}
