//! Registration of log groups for scheduled export

pub mod writer;

pub use writer::{RegistrationFailure, RegistrationReport, RegistrationWriter};
