//! Selection expression parser
//!
//! Turns one line of operator input into a selection over the 1-indexed
//! catalog listing. Accepted forms, in precedence order:
//!
//! 1. `all` (any case) - every log group, no confirmation
//! 2. `/pattern/` - log groups whose name contains a match of `pattern`
//!    (look-around and backreferences included)
//! 3. `3` or `1, 4, 4` - log groups by position
//!
//! Parsing is pure; confirmation and re-prompting live in
//! [`super::prompt`].

use crate::domain::LogSourceDescriptor;
use fancy_regex::Regex;
use thiserror::Error;

/// How a candidate set was chosen; only affects how it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Regex match over names
    Pattern,
    /// Explicit positions
    Indices,
}

/// Outcome of parsing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSelection {
    /// Every log group, in catalog order; no confirmation needed
    All,

    /// Log groups awaiting confirmation, as zero-based catalog positions in
    /// input order (duplicates kept)
    Candidates {
        kind: SelectionKind,
        indices: Vec<usize>,
    },

    /// Nothing selected; the message tells the operator why
    Rejected(SelectionError),
}

/// Why an input line selected nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The pattern compiled but matched no name
    #[error("No log groups matched the pattern '{0}'")]
    NoMatches(String),

    /// The pattern does not compile
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    /// A position outside `1..=max`
    #[error("Invalid selection: {index}. Please enter numbers between 1 and {max}")]
    OutOfRange { index: i64, max: usize },

    /// Not `all`, a pattern, or a list of integers
    #[error("Invalid input. Please enter valid numbers, 'all', or a regex pattern")]
    InvalidInput,
}

/// Parses one line of input against the catalog listing.
///
/// # Examples
///
/// ```
/// use cwl_export::core::selection::{parse_selection, ParsedSelection, SelectionKind};
/// use cwl_export::domain::LogSourceDescriptor;
///
/// let sources = vec![LogSourceDescriptor::new("api"), LogSourceDescriptor::new("worker")];
/// assert_eq!(
///     parse_selection("2,1", &sources),
///     ParsedSelection::Candidates { kind: SelectionKind::Indices, indices: vec![1, 0] }
/// );
/// ```
pub fn parse_selection(input: &str, sources: &[LogSourceDescriptor]) -> ParsedSelection {
    let input = input.trim();

    if input.eq_ignore_ascii_case("all") {
        return ParsedSelection::All;
    }

    if let Some(pattern) = regex_body(input) {
        return match_pattern(pattern, sources);
    }

    parse_indices(input, sources.len())
}

/// The text between the slashes of `/…/`, if `input` has that form.
fn regex_body(input: &str) -> Option<&str> {
    if input.len() < 2 {
        return None;
    }
    input.strip_prefix('/')?.strip_suffix('/')
}

fn match_pattern(pattern: &str, sources: &[LogSourceDescriptor]) -> ParsedSelection {
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => return ParsedSelection::Rejected(SelectionError::InvalidPattern(e.to_string())),
    };

    let mut indices = Vec::new();
    for (i, source) in sources.iter().enumerate() {
        match regex.is_match(&source.name) {
            Ok(true) => indices.push(i),
            Ok(false) => {}
            // Backtracking limit hit while matching
            Err(e) => {
                return ParsedSelection::Rejected(SelectionError::InvalidPattern(e.to_string()))
            }
        }
    }

    if indices.is_empty() {
        return ParsedSelection::Rejected(SelectionError::NoMatches(pattern.to_string()));
    }

    ParsedSelection::Candidates {
        kind: SelectionKind::Pattern,
        indices,
    }
}

fn parse_indices(input: &str, total: usize) -> ParsedSelection {
    let parsed: Result<Vec<i64>, _> = input.split(',').map(|part| part.trim().parse()).collect();
    let Ok(positions) = parsed else {
        return ParsedSelection::Rejected(SelectionError::InvalidInput);
    };

    let mut indices = Vec::with_capacity(positions.len());
    for position in positions {
        match usize::try_from(position) {
            Ok(p) if (1..=total).contains(&p) => indices.push(p - 1),
            _ => {
                return ParsedSelection::Rejected(SelectionError::OutOfRange {
                    index: position,
                    max: total,
                })
            }
        }
    }

    ParsedSelection::Candidates {
        kind: SelectionKind::Indices,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn catalog() -> Vec<LogSourceDescriptor> {
        [
            "/aws/lambda/orders",
            "/aws/lambda/payments",
            "/ecs/web",
            "/aws/rds/instance/main/error",
        ]
        .into_iter()
        .map(LogSourceDescriptor::new)
        .collect()
    }

    fn candidates(kind: SelectionKind, indices: Vec<usize>) -> ParsedSelection {
        ParsedSelection::Candidates { kind, indices }
    }

    #[test_case("all" ; "lowercase")]
    #[test_case("ALL" ; "uppercase")]
    #[test_case("  All \n" ; "surrounding whitespace")]
    fn test_all(input: &str) {
        assert_eq!(parse_selection(input, &catalog()), ParsedSelection::All);
    }

    #[test_case("1", vec![0] ; "single index")]
    #[test_case("3,1", vec![2, 0] ; "input order kept")]
    #[test_case(" 2 , 4 ", vec![1, 3] ; "whitespace around items")]
    #[test_case("2,2", vec![1, 1] ; "duplicates kept")]
    #[test_case("+4", vec![3] ; "explicit sign")]
    fn test_indices(input: &str, expected: Vec<usize>) {
        assert_eq!(
            parse_selection(input, &catalog()),
            candidates(SelectionKind::Indices, expected)
        );
    }

    #[test_case("0", 0 ; "zero")]
    #[test_case("5", 5 ; "past the end")]
    #[test_case("1,9,2", 9 ; "middle of batch")]
    #[test_case("-1", -1 ; "negative")]
    fn test_out_of_range_rejects_batch(input: &str, offending: i64) {
        assert_eq!(
            parse_selection(input, &catalog()),
            ParsedSelection::Rejected(SelectionError::OutOfRange {
                index: offending,
                max: 4
            })
        );
    }

    #[test]
    fn test_first_out_of_range_is_reported() {
        let parsed = parse_selection("7,1,8", &catalog());
        assert_eq!(
            parsed,
            ParsedSelection::Rejected(SelectionError::OutOfRange { index: 7, max: 4 })
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "word")]
    #[test_case("1,,2" ; "empty item")]
    #[test_case("1;2" ; "wrong separator")]
    #[test_case("1.5" ; "decimal")]
    #[test_case("/" ; "lone slash")]
    #[test_case("/aws" ; "unterminated pattern")]
    fn test_invalid_input(input: &str) {
        assert_eq!(
            parse_selection(input, &catalog()),
            ParsedSelection::Rejected(SelectionError::InvalidInput)
        );
    }

    #[test]
    fn test_parse_error_wins_over_range_error() {
        assert_eq!(
            parse_selection("9,x", &catalog()),
            ParsedSelection::Rejected(SelectionError::InvalidInput)
        );
    }

    #[test]
    fn test_pattern_substring_match() {
        assert_eq!(
            parse_selection("/lambda/", &catalog()),
            candidates(SelectionKind::Pattern, vec![0, 1])
        );
    }

    #[test]
    fn test_pattern_anchors_and_classes() {
        assert_eq!(
            parse_selection("/^/ecs/", &catalog()),
            candidates(SelectionKind::Pattern, vec![2])
        );
        assert_eq!(
            parse_selection("/(orders|error)$/", &catalog()),
            candidates(SelectionKind::Pattern, vec![0, 3])
        );
    }

    #[test_case("/^(?!/aws/lambda)/", vec![2, 3] ; "negative lookahead")]
    #[test_case("/(?<=lambda/)p/", vec![1] ; "lookbehind")]
    #[test_case("/(web)\\1?/", vec![2] ; "optional backreference")]
    #[test_case("/(a)\\w{3}\\1/", vec![0, 1] ; "required backreference")]
    fn test_pattern_lookaround_and_backreferences(input: &str, expected: Vec<usize>) {
        assert_eq!(
            parse_selection(input, &catalog()),
            candidates(SelectionKind::Pattern, expected)
        );
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert_eq!(
            parse_selection("//", &catalog()),
            candidates(SelectionKind::Pattern, vec![0, 1, 2, 3])
        );
    }

    #[test]
    fn test_pattern_without_matches() {
        let parsed = parse_selection("/kinesis/", &catalog());
        assert_eq!(
            parsed,
            ParsedSelection::Rejected(SelectionError::NoMatches("kinesis".to_string()))
        );
        if let ParsedSelection::Rejected(err) = parsed {
            assert_eq!(
                err.to_string(),
                "No log groups matched the pattern 'kinesis'"
            );
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let parsed = parse_selection("/([a-z/", &catalog());
        match parsed {
            ParsedSelection::Rejected(err @ SelectionError::InvalidPattern(_)) => {
                assert!(err.to_string().starts_with("Invalid regex pattern: "));
            }
            other => panic!("expected invalid pattern, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_message() {
        let err = SelectionError::OutOfRange { index: 12, max: 4 };
        assert_eq!(
            err.to_string(),
            "Invalid selection: 12. Please enter numbers between 1 and 4"
        );
    }
}
