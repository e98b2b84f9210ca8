//! DynamoDB item encoding for configuration records
//!
//! Items use the attribute names `logGroupName` (partition key),
//! `s3BucketName`, `s3Prefix` (omitted when unset) and `createdAt`.

use crate::domain::{ExportConfigurationRecord, StoreError};
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use std::collections::HashMap;

/// Partition key attribute
pub const ATTR_LOG_GROUP_NAME: &str = "logGroupName";
/// Destination bucket attribute
pub const ATTR_S3_BUCKET_NAME: &str = "s3BucketName";
/// Optional destination prefix attribute
pub const ATTR_S3_PREFIX: &str = "s3Prefix";
/// Write timestamp attribute
pub const ATTR_CREATED_AT: &str = "createdAt";

/// A raw DynamoDB item
pub type Item = HashMap<String, AttributeValue>;

/// Encodes a record as an item.
pub fn to_item(record: &ExportConfigurationRecord) -> Item {
    let mut item = Item::new();
    item.insert(
        ATTR_LOG_GROUP_NAME.to_string(),
        AttributeValue::S(record.log_group_name.clone()),
    );
    item.insert(
        ATTR_S3_BUCKET_NAME.to_string(),
        AttributeValue::S(record.s3_bucket_name.clone()),
    );
    if let Some(prefix) = record.s3_prefix.as_deref().filter(|p| !p.is_empty()) {
        item.insert(ATTR_S3_PREFIX.to_string(), AttributeValue::S(prefix.to_string()));
    }
    if let Some(created_at) = record.created_at {
        item.insert(
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
    }
    item
}

/// Decodes an item into a record.
///
/// # Errors
///
/// Returns [`StoreError::MalformedRecord`] when `logGroupName` or
/// `s3BucketName` is missing, empty, or not a string.
pub fn from_item(item: &Item) -> Result<ExportConfigurationRecord, StoreError> {
    let log_group_name = required_string(item, ATTR_LOG_GROUP_NAME, None)?;
    let s3_bucket_name = required_string(item, ATTR_S3_BUCKET_NAME, Some(&log_group_name))?;

    let s3_prefix = optional_string(item, ATTR_S3_PREFIX).filter(|p| !p.is_empty());
    let created_at = optional_string(item, ATTR_CREATED_AT).and_then(|raw| parse_timestamp(&raw));

    Ok(ExportConfigurationRecord {
        log_group_name,
        s3_bucket_name,
        s3_prefix,
        created_at,
    })
}

/// Key of an item, used as a scan continuation token.
pub fn key_of(item: &Item) -> Option<String> {
    optional_string(item, ATTR_LOG_GROUP_NAME)
}

/// Builds the `ExclusiveStartKey` for a continuation token.
pub fn start_key(token: String) -> Item {
    HashMap::from([(ATTR_LOG_GROUP_NAME.to_string(), AttributeValue::S(token))])
}

fn required_string(
    item: &Item,
    attr: &str,
    log_group: Option<&str>,
) -> Result<String, StoreError> {
    match optional_string(item, attr) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(StoreError::MalformedRecord(match log_group {
            Some(name) => format!("record {name} has no string attribute '{attr}'"),
            None => format!("item has no string attribute '{attr}'"),
        })),
    }
}

fn optional_string(item: &Item, attr: &str) -> Option<String> {
    item.get(attr)
        .and_then(|value| value.as_s().ok())
        .cloned()
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 timestamps (read as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
