//! Line-oriented terminal I/O
//!
//! Wraps any `BufRead` + `Write` pair so prompts can be driven from stdin or
//! from in-memory buffers in tests.

use crate::domain::{ExportToolError, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Prompting console
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console over the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over the given reader and writer
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` (no newline) and reads one line.
    ///
    /// The line terminator is stripped; other whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ExportToolError::InputClosed`] at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExportToolError::InputClosed);
        }

        let trimmed_len = line.trim_end_matches(|c: char| c == '\r' || c == '\n').len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Consumes the console and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_strips_line_ending() {
        let mut console = Console::new(Cursor::new("  bucket \r\nnext\n"), Vec::new());
        assert_eq!(console.ask("Bucket: ").unwrap(), "  bucket ");
        assert_eq!(console.ask("Next: ").unwrap(), "next");
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Bucket: Next: ");
    }

    #[test]
    fn test_ask_last_line_without_newline() {
        let mut console = Console::new(Cursor::new("y"), Vec::new());
        assert_eq!(console.ask("? ").unwrap(), "y");
    }

    #[test]
    fn test_ask_at_eof() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert!(matches!(
            console.ask("? "),
            Err(ExportToolError::InputClosed)
        ));
    }

    #[test]
    fn test_say() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        console.say("hello").unwrap();
        assert_eq!(console.into_output(), b"hello\n");
    }
}
