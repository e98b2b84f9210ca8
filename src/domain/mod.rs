//! Domain models and types for cwl-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Catalog data** ([`LogSourceDescriptor`])
//! - **Persisted configuration** ([`ExportConfigurationRecord`], [`ExportDestination`])
//! - **Error types** ([`ExportToolError`], [`CatalogError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use cwl_export::domain::{ExportConfigurationRecord, ExportDestination};
//! use chrono::Utc;
//!
//! # fn example() -> cwl_export::domain::Result<()> {
//! let destination = ExportDestination::new("my-log-archive", None)?;
//! let record = ExportConfigurationRecord::new("/aws/lambda/orders", &destination, Utc::now());
//! assert!(record.s3_prefix.is_none());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod records;
pub mod result;

pub use errors::{CatalogError, ExportToolError, StoreError};
pub use records::{ExportConfigurationRecord, ExportDestination, LogSourceDescriptor};
pub use result::Result;
