//! Interactive log group selection
//!
//! - [`parser`] - pure parsing of one selection expression
//! - [`prompt`] - the read-evaluate-confirm loop and catalog listing
//! - [`console`] - line-oriented prompt I/O

pub mod console;
pub mod parser;
pub mod prompt;

pub use console::Console;
pub use parser::{parse_selection, ParsedSelection, SelectionError, SelectionKind};
pub use prompt::{display_catalog, format_catalog_line, select_sources};
