//! Adapter traits
//!
//! The three AWS collaborators (log catalog, configuration table, export API)
//! are reached only through these traits, so the registration and export
//! logic can run against in-memory implementations.

use crate::domain::{ExportConfigurationRecord, LogSourceDescriptor, Result};
use async_trait::async_trait;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Continuation token; `None` on the last page
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A final page holding `items`
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// A page followed by more pages
    pub fn with_next(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

/// Anything that can be read one page at a time.
///
/// Passing `None` fetches the first page; passing a page's `next_token`
/// fetches the page after it.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type on each page
    type Item: Send;

    /// Fetch one page
    async fn fetch_page(&self, token: Option<String>) -> Result<Page<Self::Item>>;
}

/// Lists the log groups available for export.
#[async_trait]
pub trait LogCatalog: Send + Sync {
    /// Fetch one page of log groups
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::CatalogError::ListFailed`] if the catalog cannot be read.
    async fn list_page(&self, token: Option<String>) -> Result<Page<LogSourceDescriptor>>;
}

/// Stores one export configuration record per log group.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Write (or overwrite) the record keyed by its log group name
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StoreError::PutFailed`] if the write is rejected.
    async fn put_record(&self, record: &ExportConfigurationRecord) -> Result<()>;

    /// Fetch one page of records
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StoreError::ScanFailed`] if the table cannot be read,
    /// or [`crate::domain::StoreError::MalformedRecord`] for an undecodable item.
    async fn scan_page(&self, token: Option<String>) -> Result<Page<ExportConfigurationRecord>>;
}

/// Parameters of one export task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Log group to export
    pub log_group_name: String,

    /// Destination bucket
    pub destination_bucket: String,

    /// Destination key prefix
    pub destination_prefix: String,

    /// Window start, milliseconds since the Unix epoch
    pub from_ms: i64,

    /// Window end, milliseconds since the Unix epoch
    pub to_ms: i64,
}

/// Creates export tasks.
#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Start an export task and return its task id
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::CatalogError::ExportRejected`] when the service refuses
    /// the request, e.g. another export for the log group is still running.
    async fn create_export(&self, request: &ExportRequest) -> Result<String>;
}

/// Adapts a [`LogCatalog`] to [`PageSource`].
pub struct CatalogPages<'a, C: ?Sized>(pub &'a C);

#[async_trait]
impl<'a, C: LogCatalog + ?Sized> PageSource for CatalogPages<'a, C> {
    type Item = LogSourceDescriptor;

    async fn fetch_page(&self, token: Option<String>) -> Result<Page<Self::Item>> {
        self.0.list_page(token).await
    }
}

/// Adapts a [`ConfigStore`] scan to [`PageSource`].
pub struct StorePages<'a, S: ?Sized>(pub &'a S);

#[async_trait]
impl<'a, S: ConfigStore + ?Sized> PageSource for StorePages<'a, S> {
    type Item = ExportConfigurationRecord;

    async fn fetch_page(&self, token: Option<String>) -> Result<Page<Self::Item>> {
        self.0.scan_page(token).await
    }
}
