//! Interactive selection loop
//!
//! Shows the catalog, reads a selection expression, asks for confirmation
//! where required, and repeats until a selection is confirmed.

use super::console::Console;
use super::parser::{parse_selection, ParsedSelection, SelectionKind};
use crate::domain::{ExportToolError, LogSourceDescriptor, Result};
use std::io::{BufRead, Write};

/// Formats one catalog line: `  3. /aws/lambda/orders (1.25 MB, created: 2024-03-01)`
pub fn format_catalog_line(position: usize, source: &LogSourceDescriptor) -> String {
    format!(
        "{:>3}. {} ({:.2} MB, created: {})",
        position,
        source.name,
        source.size_mb(),
        source.creation_time.format("%Y-%m-%d")
    )
}

/// Prints the numbered catalog listing.
pub fn display_catalog<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    sources: &[LogSourceDescriptor],
) -> Result<()> {
    console.say("\nAvailable CloudWatch Log Groups:")?;
    console.say("-------------------------------")?;
    for (i, source) in sources.iter().enumerate() {
        console.say(format_catalog_line(i + 1, source))?;
    }
    console.say("\n")?;
    Ok(())
}

/// Runs the read-evaluate-confirm loop until a selection is confirmed.
///
/// `all` returns every source without confirmation. Index lists and patterns
/// are listed back and need a literal `y`; any other answer starts over
/// with a fresh input.
///
/// # Errors
///
/// - [`ExportToolError::Input`] if `sources` is empty
/// - [`ExportToolError::InputClosed`] if input ends before a confirmed selection
pub fn select_sources<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    sources: &[LogSourceDescriptor],
) -> Result<Vec<LogSourceDescriptor>> {
    if sources.is_empty() {
        return Err(ExportToolError::Input(
            "No log groups available to select".to_string(),
        ));
    }

    let prompt = format!(
        "Select log groups (1-{}, comma-separated, 'all', or regex pattern): ",
        sources.len()
    );

    loop {
        let line = console.ask(&prompt)?;

        match parse_selection(&line, sources) {
            ParsedSelection::All => {
                tracing::debug!(count = sources.len(), "All log groups selected");
                return Ok(sources.to_vec());
            }
            ParsedSelection::Candidates { kind, indices } => {
                let heading = match kind {
                    SelectionKind::Pattern => format!("\nMatched {} log groups:", indices.len()),
                    SelectionKind::Indices => "\nSelected log groups:".to_string(),
                };
                console.say(heading)?;
                for &i in &indices {
                    console.say(format!("- {}", sources[i].name))?;
                }

                let answer = console.ask("\nConfirm selection (y/n): ")?;
                if answer.trim().eq_ignore_ascii_case("y") {
                    tracing::debug!(count = indices.len(), "Selection confirmed");
                    return Ok(indices.into_iter().map(|i| sources[i].clone()).collect());
                }
                tracing::debug!("Selection not confirmed, prompting again");
            }
            ParsedSelection::Rejected(reason) => {
                console.say(reason.to_string())?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn sources() -> Vec<LogSourceDescriptor> {
        ["app-logs", "api-logs", "batch"]
            .into_iter()
            .map(LogSourceDescriptor::new)
            .collect()
    }

    fn run(input: &str) -> (Result<Vec<String>>, String) {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        let result = select_sources(&mut console, &sources())
            .map(|selected| selected.into_iter().map(|s| s.name).collect());
        let output = String::from_utf8(console.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn test_format_catalog_line() {
        let source = LogSourceDescriptor::new("/aws/lambda/orders")
            .with_stored_bytes(1_310_720)
            .with_creation_time(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        assert_eq!(
            format_catalog_line(3, &source),
            "  3. /aws/lambda/orders (1.25 MB, created: 2024-03-01)"
        );
    }

    #[test]
    fn test_all_skips_confirmation() {
        let (result, output) = run("all\n");
        assert_eq!(result.unwrap(), vec!["app-logs", "api-logs", "batch"]);
        assert!(!output.contains("Confirm selection"));
    }

    #[test]
    fn test_indices_confirmed() {
        let (result, output) = run("3,1\ny\n");
        assert_eq!(result.unwrap(), vec!["batch", "app-logs"]);
        assert!(output.contains("Selected log groups:\n- batch\n- app-logs\n"));
    }

    #[test]
    fn test_uppercase_confirmation_accepted() {
        let (result, _) = run("2\nY\n");
        assert_eq!(result.unwrap(), vec!["api-logs"]);
    }

    #[test]
    fn test_confirmation_ignores_surrounding_whitespace() {
        let (result, _) = run("1\n  y \n");
        assert_eq!(result.unwrap(), vec!["app-logs"]);
    }

    #[test]
    fn test_declined_confirmation_reprompts_from_scratch() {
        let (result, output) = run("1\nn\n2\ny\n");
        assert_eq!(result.unwrap(), vec!["api-logs"]);
        assert_eq!(output.matches("Select log groups (1-3").count(), 2);
    }

    #[test]
    fn test_yes_is_not_y() {
        let (result, output) = run("1\nyes\n1\ny\n");
        assert_eq!(result.unwrap(), vec!["app-logs"]);
        assert_eq!(output.matches("Confirm selection (y/n): ").count(), 2);
    }

    #[test]
    fn test_out_of_range_rejects_whole_batch() {
        let (result, output) = run("1,4\n2\ny\n");
        assert_eq!(result.unwrap(), vec!["api-logs"]);
        assert!(output.contains("Invalid selection: 4. Please enter numbers between 1 and 3"));
    }

    #[test]
    fn test_pattern_needs_confirmation() {
        let (result, output) = run("/-logs$/\ny\n");
        assert_eq!(result.unwrap(), vec!["app-logs", "api-logs"]);
        assert!(output.contains("Matched 2 log groups:"));
    }

    #[test]
    fn test_pattern_without_matches_reprompts() {
        let (result, output) = run("/nothing/\nall\n");
        assert_eq!(result.unwrap().len(), 3);
        assert!(output.contains("No log groups matched the pattern 'nothing'"));
    }

    #[test]
    fn test_invalid_pattern_reprompts() {
        let (result, output) = run("/(/\nall\n");
        assert!(result.is_ok());
        assert!(output.contains("Invalid regex pattern:"));
    }

    #[test]
    fn test_garbage_reprompts() {
        let (result, output) = run("two\nall\n");
        assert!(result.is_ok());
        assert!(output.contains("Invalid input. Please enter valid numbers, 'all', or a regex pattern"));
    }

    #[test]
    fn test_input_closed() {
        let (result, _) = run("1\n");
        assert!(matches!(result, Err(ExportToolError::InputClosed)));
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let mut console = Console::new(Cursor::new("all\n"), Vec::new());
        let result = select_sources(&mut console, &[]);
        assert!(matches!(result, Err(ExportToolError::Input(_))));
    }

    #[test]
    fn test_display_catalog() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        display_catalog(&mut console, &sources()).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Available CloudWatch Log Groups:"));
        assert!(output.contains("  1. app-logs (0.00 MB, created: 1970-01-01)"));
        assert!(output.contains("  3. batch"));
    }
}
