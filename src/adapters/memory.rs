//! In-memory adapters
//!
//! Implementations of the adapter traits backed by process memory, with
//! configurable page sizes and injected failures. Used by the test suites.

use crate::adapters::traits::{ConfigStore, ExportApi, ExportRequest, LogCatalog, Page};
use crate::domain::{
    CatalogError, ExportConfigurationRecord, LogSourceDescriptor, Result, StoreError,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

fn page_of<T: Clone>(
    items: &[T],
    token: Option<String>,
    page_size: usize,
) -> std::result::Result<Page<T>, String> {
    let start = match token {
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| format!("Invalid continuation token: {token}"))?,
        None => 0,
    };
    let end = (start + page_size.max(1)).min(items.len());
    let slice = items.get(start..end).unwrap_or_default().to_vec();

    if end < items.len() {
        Ok(Page::with_next(slice, end.to_string()))
    } else {
        Ok(Page::last(slice))
    }
}

/// Log catalog holding a fixed list of log groups.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    sources: Vec<LogSourceDescriptor>,
    page_size: usize,
    unreachable: bool,
}

impl InMemoryCatalog {
    /// Catalog serving `sources` 50 per page
    pub fn new(sources: Vec<LogSourceDescriptor>) -> Self {
        Self {
            sources,
            page_size: 50,
            unreachable: false,
        }
    }

    /// Catalog built from bare names
    pub fn from_names(names: &[&str]) -> Self {
        Self::new(names.iter().map(|n| LogSourceDescriptor::new(*n)).collect())
    }

    /// Sets the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Makes every request fail
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }
}

#[async_trait]
impl LogCatalog for InMemoryCatalog {
    async fn list_page(&self, token: Option<String>) -> Result<Page<LogSourceDescriptor>> {
        if self.unreachable {
            return Err(CatalogError::ListFailed("catalog unreachable".to_string()).into());
        }
        page_of(&self.sources, token, self.page_size)
            .map_err(|e| CatalogError::ListFailed(e).into())
    }
}

/// Configuration table kept in a sorted map.
#[derive(Debug)]
pub struct InMemoryConfigStore {
    records: Mutex<BTreeMap<String, ExportConfigurationRecord>>,
    rejected_keys: HashSet<String>,
    page_size: usize,
    unreachable: bool,
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConfigStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            rejected_keys: HashSet::new(),
            page_size: 25,
            unreachable: false,
        }
    }

    /// Store pre-populated with `records`
    pub fn with_records(records: Vec<ExportConfigurationRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.records.lock() {
            for record in records {
                map.insert(record.log_group_name.clone(), record);
            }
        }
        store
    }

    /// Sets the scan page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Rejects writes for the given log group
    pub fn rejecting(mut self, log_group_name: impl Into<String>) -> Self {
        self.rejected_keys.insert(log_group_name.into());
        self
    }

    /// Makes every request fail
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Snapshot of the stored records ordered by log group name
    pub fn records(&self) -> Vec<ExportConfigurationRecord> {
        self.records
            .lock()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default()
    }

    fn lock_error() -> StoreError {
        StoreError::ScanFailed("store lock poisoned".to_string())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn put_record(&self, record: &ExportConfigurationRecord) -> Result<()> {
        if self.unreachable || self.rejected_keys.contains(&record.log_group_name) {
            return Err(StoreError::PutFailed {
                log_group: record.log_group_name.clone(),
                message: "AccessDeniedException: write rejected".to_string(),
            }
            .into());
        }

        let mut map = self.records.lock().map_err(|_| Self::lock_error())?;
        map.insert(record.log_group_name.clone(), record.clone());
        Ok(())
    }

    async fn scan_page(&self, token: Option<String>) -> Result<Page<ExportConfigurationRecord>> {
        if self.unreachable {
            return Err(StoreError::ScanFailed("ResourceNotFoundException".to_string()).into());
        }

        let snapshot: Vec<ExportConfigurationRecord> = {
            let map = self.records.lock().map_err(|_| Self::lock_error())?;
            map.values().cloned().collect()
        };
        page_of(&snapshot, token, self.page_size).map_err(|e| StoreError::ScanFailed(e).into())
    }
}

/// Export API that records every request and fails for chosen log groups.
#[derive(Debug, Default)]
pub struct RecordingExportApi {
    requests: Mutex<Vec<ExportRequest>>,
    failing: HashSet<String>,
}

impl RecordingExportApi {
    /// API accepting every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects exports of `log_group_name` as if an export were already running
    pub fn failing_for(mut self, log_group_name: impl Into<String>) -> Self {
        self.failing.insert(log_group_name.into());
        self
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<ExportRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ExportApi for RecordingExportApi {
    async fn create_export(&self, request: &ExportRequest) -> Result<String> {
        let sequence = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| CatalogError::ExportRejected("export api lock poisoned".to_string()))?;
            requests.push(request.clone());
            requests.len()
        };

        if self.failing.contains(&request.log_group_name) {
            return Err(CatalogError::ExportRejected(format!(
                "LimitExceededException: Resource limit exceeded for {}",
                request.log_group_name
            ))
            .into());
        }

        Ok(format!("task-{sequence:04}"))
    }
}
