//! Configuration schema types
//!
//! This module defines the configuration structure for cwl-export.

use serde::{Deserialize, Serialize};

/// Export window used when nothing (or something unusable) is configured: 24 hours.
pub const DEFAULT_TIME_RANGE_MINUTES: u32 = 1440;

/// Upper bound for `export.max_concurrency`.
pub const MAX_EXPORT_CONCURRENCY: usize = 64;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Configuration table settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Scheduled export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        Ok(())
    }

    /// Validates the settings the scheduled export cannot run without.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no table name is set
    pub fn validate_for_export(&self) -> Result<(), String> {
        self.validate()?;
        if self.store.table_name.trim().is_empty() {
            return Err(
                "store.table_name cannot be empty (set it in the config file or LOGS_CONFIG_TABLE_NAME)"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Configuration table (DynamoDB) settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the table holding one record per registered log group
    #[serde(default)]
    pub table_name: String,

    /// AWS region; the default provider chain decides when unset
    #[serde(default)]
    pub region: Option<String>,
}

/// Scheduled export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Length of the trailing export window in minutes
    #[serde(default = "default_time_range_minutes")]
    pub time_range_minutes: u32,

    /// How many export requests may be in flight at once (1 = sequential)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.time_range_minutes == 0 {
            return Err("export.time_range_minutes must be > 0".to_string());
        }

        if self.max_concurrency == 0 || self.max_concurrency > MAX_EXPORT_CONCURRENCY {
            return Err(format!(
                "export.max_concurrency must be between 1 and {}, got {}",
                MAX_EXPORT_CONCURRENCY, self.max_concurrency
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            time_range_minutes: default_time_range_minutes(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Logging configuration
///
/// Built from command-line flags rather than the config file, so that
/// configuration warnings are emitted through an already initialized subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit console logs as JSON lines
    #[serde(default)]
    pub json: bool,

    /// Enable rolling file logs
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rolling file logs
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Validates the logging configuration
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown rotation policy or an empty log path
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_range_minutes() -> u32 {
    DEFAULT_TIME_RANGE_MINUTES
}

fn default_max_concurrency() -> usize {
    1
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
