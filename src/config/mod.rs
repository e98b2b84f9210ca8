//! Configuration management for cwl-export.
//!
//! Configuration comes from an optional TOML file plus environment overrides.
//! It is loaded once per process and passed into each component; nothing reads
//! the environment after startup.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! table_name = "${LOG_EXPORT_TABLE}"
//! region = "us-east-1"
//!
//! [export]
//! time_range_minutes = 1440
//! max_concurrency = 1
//! ```
//!
//! # Environment Variables
//!
//! - `LOGS_CONFIG_TABLE_NAME` - configuration table name
//! - `EXPORT_TIME_RANGE_MINUTES` - export window; non-numeric values fall back to 1440 with a warning
//! - `CWL_EXPORT_LOG_LEVEL` - log level
//! - `CWL_EXPORT_MAX_CONCURRENCY` - export requests in flight at once
//!
//! ```rust,no_run
//! use cwl_export::config::{load_config, resolve_config_path};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = resolve_config_path(None);
//! let config = load_config(path.as_deref())?;
//! println!("Window: {} minutes", config.export.time_range_minutes);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_time_range_minutes, resolve_config_path};
pub use schema::{
    AppConfig, ApplicationConfig, ExportConfig, LoggingConfig, StoreConfig,
    DEFAULT_TIME_RANGE_MINUTES,
};
