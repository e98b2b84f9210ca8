//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AppConfig, DEFAULT_TIME_RANGE_MINUTES};
use crate::domain::errors::ExportToolError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "cwl-export.toml";

/// Environment variable naming the configuration table
pub const ENV_TABLE_NAME: &str = "LOGS_CONFIG_TABLE_NAME";

/// Environment variable holding the export window length in minutes
pub const ENV_TIME_RANGE_MINUTES: &str = "EXPORT_TIME_RANGE_MINUTES";

const ENV_LOG_LEVEL: &str = "CWL_EXPORT_LOG_LEVEL";
const ENV_MAX_CONCURRENCY: &str = "CWL_EXPORT_MAX_CONCURRENCY";

/// Decides which config file to read.
///
/// An explicit path is always returned (and must exist when loaded). Without
/// one, [`DEFAULT_CONFIG_FILE`] is used if present in the working directory.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

/// Loads configuration
///
/// This function:
/// 1. Reads the TOML file, if a path is given
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`AppConfig`] (defaults when no file)
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - The given file does not exist or cannot be read
/// - TOML parsing fails
/// - A referenced `${VAR}` is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cwl_export::config::loader::load_config;
/// use std::path::Path;
///
/// let config = load_config(Some(Path::new("cwl-export.toml"))).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None => {
            tracing::debug!("No configuration file, using defaults");
            AppConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config.validate().map_err(|e| {
        ExportToolError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(ExportToolError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExportToolError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: AppConfig = toml::from_str(&contents)
        .map_err(|e| ExportToolError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExportToolError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExportToolError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment overrides, reading variables through `lookup`.
fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.application.log_level = val.to_lowercase();
    }

    if let Some(val) = lookup(ENV_TABLE_NAME) {
        config.store.table_name = val;
    }

    if let Some(val) = lookup(ENV_TIME_RANGE_MINUTES) {
        config.export.time_range_minutes = parse_time_range_minutes(Some(&val));
    }

    if let Some(val) = lookup(ENV_MAX_CONCURRENCY) {
        match val.trim().parse() {
            Ok(concurrency) => config.export.max_concurrency = concurrency,
            Err(_) => tracing::warn!(
                value = %val,
                "Invalid {} value, keeping {}",
                ENV_MAX_CONCURRENCY,
                config.export.max_concurrency
            ),
        }
    }
}

/// Parses the export window setting.
///
/// A missing value yields [`DEFAULT_TIME_RANGE_MINUTES`]. A value that is not a
/// positive integer also yields the default, with a warning instead of an error.
pub fn parse_time_range_minutes(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_TIME_RANGE_MINUTES;
    };

    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => {
            tracing::warn!(
                value = %raw,
                default_minutes = DEFAULT_TIME_RANGE_MINUTES,
                "Invalid {} value, using default of {} minutes (24 hours)",
                ENV_TIME_RANGE_MINUTES,
                DEFAULT_TIME_RANGE_MINUTES
            );
            DEFAULT_TIME_RANGE_MINUTES
        }
    }
}
