//! Scheduled export
//!
//! - [`coordinator`] - the orchestrator run
//! - [`window`] - export window and default prefix
//! - [`summary`] - per-record outcomes and the invocation response

pub mod coordinator;
pub mod summary;
pub mod window;

pub use coordinator::ExportOrchestrator;
pub use summary::{ExportOutcome, ExportStatus, InvocationResponse, ResponseBody};
pub use window::{default_prefix, resolve_prefix, ExportWindow};
