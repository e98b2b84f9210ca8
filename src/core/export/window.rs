//! Export window and destination prefix computation

use crate::domain::ExportConfigurationRecord;
use chrono::{DateTime, NaiveDate, Utc};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Millisecond-epoch range covered by one export task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportWindow {
    /// Window start (inclusive), ms since the Unix epoch
    pub from_ms: i64,

    /// Window end, ms since the Unix epoch
    pub to_ms: i64,
}

impl ExportWindow {
    /// The `minutes`-long window ending at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cwl_export::core::export::ExportWindow;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let now = Utc.timestamp_millis_opt(1_709_251_200_000).unwrap();
    /// let window = ExportWindow::ending_at(now, 1440);
    /// assert_eq!(window.to_ms - window.from_ms, 86_400_000);
    /// ```
    pub fn ending_at(now: DateTime<Utc>, minutes: u32) -> Self {
        let to_ms = now.timestamp_millis();
        Self {
            from_ms: to_ms - i64::from(minutes) * MILLIS_PER_MINUTE,
            to_ms,
        }
    }

    /// Window start as a timestamp
    pub fn from_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.from_ms)
    }

    /// Window end as a timestamp
    pub fn to_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.to_ms)
    }
}

/// Prefix used when a record has none: `exports/{log group}/{YYYY-MM-DD}`.
pub fn default_prefix(log_group_name: &str, date: NaiveDate) -> String {
    format!("exports/{}/{}", log_group_name, date.format("%Y-%m-%d"))
}

/// The record's prefix, or the default prefix for `date`.
pub fn resolve_prefix(record: &ExportConfigurationRecord, date: NaiveDate) -> String {
    match record.s3_prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => prefix.to_string(),
        _ => default_prefix(&record.log_group_name, date),
    }
}
