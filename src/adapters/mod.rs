//! External service adapters
//!
//! - [`cloudwatch`] - CloudWatch Logs (log catalog, export tasks)
//! - [`dynamodb`] - configuration table
//! - [`memory`] - in-memory implementations of the same traits

pub mod cloudwatch;
pub mod dynamodb;
pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::AwsClients;
pub use traits::{
    CatalogPages, ConfigStore, ExportApi, ExportRequest, LogCatalog, Page, PageSource, StorePages,
};
