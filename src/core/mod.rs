//! Core logic
//!
//! - [`selection`] - interactive log group selection
//! - [`register`] - writing configuration records
//! - [`export`] - the scheduled export run
//! - [`pagination`] - lazy page streams over the adapters

pub mod export;
pub mod pagination;
pub mod register;
pub mod selection;
