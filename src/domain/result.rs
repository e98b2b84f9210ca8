//! Result type alias for cwl-export

use super::errors::ExportToolError;

/// Result type alias using [`ExportToolError`] as the error type.
///
/// # Examples
///
/// ```
/// use cwl_export::domain::result::Result;
/// use cwl_export::domain::errors::ExportToolError;
///
/// fn failing_function() -> Result<()> {
///     Err(ExportToolError::Input("S3 bucket name is required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExportToolError>;
