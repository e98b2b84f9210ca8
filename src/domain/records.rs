//! Log group descriptors and export configuration records

use crate::domain::errors::ExportToolError;
use crate::domain::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A log group as reported by the log catalog.
///
/// Not owned by this tool; fetched fresh on every registration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSourceDescriptor {
    /// Log group name (unique within an account and region)
    pub name: String,

    /// Stored size in bytes (0 when the catalog does not report it)
    pub stored_bytes: u64,

    /// Creation time (Unix epoch when the catalog does not report it)
    pub creation_time: DateTime<Utc>,
}

impl LogSourceDescriptor {
    /// Creates a descriptor with no size or creation information
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stored_bytes: 0,
            creation_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Builds a descriptor from the raw millisecond/byte fields the catalog returns.
    pub fn from_catalog(
        name: impl Into<String>,
        stored_bytes: Option<i64>,
        creation_time_ms: Option<i64>,
    ) -> Self {
        let creation_time = creation_time_ms
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            name: name.into(),
            stored_bytes: stored_bytes.map(|b| b.max(0) as u64).unwrap_or(0),
            creation_time,
        }
    }

    /// Sets the stored size
    pub fn with_stored_bytes(mut self, stored_bytes: u64) -> Self {
        self.stored_bytes = stored_bytes;
        self
    }

    /// Sets the creation time
    pub fn with_creation_time(mut self, creation_time: DateTime<Utc>) -> Self {
        self.creation_time = creation_time;
        self
    }

    /// Stored size in mebibytes
    pub fn size_mb(&self) -> f64 {
        self.stored_bytes as f64 / BYTES_PER_MB
    }
}

/// Where a registered log group is exported to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDestination {
    bucket: String,
    prefix: Option<String>,
}

impl ExportDestination {
    /// Creates a destination.
    ///
    /// # Errors
    ///
    /// Returns [`ExportToolError::Input`] when the bucket name is empty.
    /// An empty prefix is normalized to `None`.
    pub fn new(bucket: impl Into<String>, prefix: Option<String>) -> Result<Self> {
        let bucket = bucket.into().trim().to_string();
        if bucket.is_empty() {
            return Err(ExportToolError::Input(
                "S3 bucket name is required".to_string(),
            ));
        }

        let prefix = prefix
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self { bucket, prefix })
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key prefix, if one was given
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// The durable mapping from a log group to its S3 destination.
///
/// Keyed by `log_group_name`; writing a record for an existing key replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfigurationRecord {
    /// Log group name (table key)
    pub log_group_name: String,

    /// Destination bucket
    pub s3_bucket_name: String,

    /// Destination key prefix; `None` means a default is computed at export time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_prefix: Option<String>,

    /// When the record was written. Records created by other tools may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ExportConfigurationRecord {
    /// Creates a record for a log group and destination, stamped with `created_at`.
    pub fn new(
        log_group_name: impl Into<String>,
        destination: &ExportDestination,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            s3_bucket_name: destination.bucket().to_string(),
            s3_prefix: destination.prefix().map(str::to_string),
            created_at: Some(created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_descriptor_from_catalog() {
        let d = LogSourceDescriptor::from_catalog("/aws/lambda/app", Some(2_097_152), Some(0));
        assert_eq!(d.name, "/aws/lambda/app");
        assert_eq!(d.stored_bytes, 2_097_152);
        assert!((d.size_mb() - 2.0).abs() < f64::EPSILON);
        assert_eq!(d.creation_time, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_descriptor_missing_fields_default() {
        let d = LogSourceDescriptor::from_catalog("app", None, None);
        assert_eq!(d.stored_bytes, 0);
        assert_eq!(d.creation_time, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_destination_requires_bucket() {
        assert!(ExportDestination::new("", None).is_err());
        assert!(ExportDestination::new("   ", Some("p".to_string())).is_err());
    }

    #[test]
    fn test_destination_trims_input() {
        let dest = ExportDestination::new("  archive ", Some(" logs/ ".to_string())).unwrap();
        assert_eq!(dest.bucket(), "archive");
        assert_eq!(dest.prefix(), Some("logs/"));

        let dest = ExportDestination::new("archive", Some("   ".to_string())).unwrap();
        assert_eq!(dest.prefix(), None);
    }

    #[test]
    fn test_destination_empty_prefix_is_none() {
        let dest = ExportDestination::new("bucket", Some(String::new())).unwrap();
        assert_eq!(dest.bucket(), "bucket");
        assert_eq!(dest.prefix(), None);

        let dest = ExportDestination::new("bucket", Some("logs/app".to_string())).unwrap();
        assert_eq!(dest.prefix(), Some("logs/app"));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let dest = ExportDestination::new("bucket", None).unwrap();
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let record = ExportConfigurationRecord::new("app-logs", &dest, created);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["logGroupName"], "app-logs");
        assert_eq!(json["s3BucketName"], "bucket");
        assert!(json.get("s3Prefix").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
