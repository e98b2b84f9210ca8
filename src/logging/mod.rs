//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable or JSON console output on stderr
//! - configurable log levels
//! - optional rolling JSON log files
//!
//! # Example
//!
//! ```no_run
//! use cwl_export::logging::init_logging;
//! use cwl_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a created export task
///
/// # Example
///
/// ```no_run
/// use cwl_export::log_export_started;
///
/// log_export_started!("/aws/lambda/orders", "task-0001");
/// ```
#[macro_export]
macro_rules! log_export_started {
    ($log_group:expr, $task_id:expr) => {
        tracing::info!(
            log_group = %$log_group,
            task_id = %$task_id,
            "Export task created"
        );
    };
}

/// Log a rejected export request
///
/// # Example
///
/// ```no_run
/// use cwl_export::log_export_failed;
///
/// log_export_failed!("/aws/lambda/orders", "LimitExceededException");
/// ```
#[macro_export]
macro_rules! log_export_failed {
    ($log_group:expr, $error:expr) => {
        tracing::error!(
            log_group = %$log_group,
            error = %$error,
            "Error exporting logs"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cwl_export::log_error_with_context;
/// use cwl_export::domain::ExportToolError;
///
/// let error = ExportToolError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
