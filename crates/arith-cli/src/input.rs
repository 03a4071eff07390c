//! Where the interactive session gets its lines from
//!
//! A terminal gets a `rustyline` editor with up-arrow recall; pipes, files
//! and tests get a plain [`BufRead`] loop.

use crate::error::CliResult;
use crate::output::Reporter;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::fmt;
use std::io::BufRead;

/// Supplies the REPL with input lines
pub trait LineSource {
    /// Shows the prompt and reads one line; `None` at end of input
    fn next_line(&mut self, reporter: &Reporter) -> CliResult<Option<String>>;

    /// Makes a non-blank line available for recall
    fn remember(&mut self, _line: &str) {}
}

/// Lines from any reader
#[derive(Debug)]
pub struct PipedInput<R> {
    reader: R,
}

impl<R: BufRead> PipedInput<R> {
    /// Wraps `reader`
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for PipedInput<R> {
    fn next_line(&mut self, reporter: &Reporter) -> CliResult<Option<String>> {
        reporter.prompt();
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Terminal line editing with in-memory recall
pub struct LineEditor {
    editor: Editor<(), DefaultHistory>,
}

impl fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineEditor").finish_non_exhaustive()
    }
}

impl LineEditor {
    /// Sets up the editor on the controlling terminal
    pub fn new() -> CliResult<Self> {
        Ok(Self {
            editor: Editor::new()?,
        })
    }
}

impl LineSource for LineEditor {
    fn next_line(&mut self, reporter: &Reporter) -> CliResult<Option<String>> {
        let prompt = reporter.prompt_text();
        loop {
            match self.editor.readline(&prompt) {
                Ok(line) => return Ok(Some(line)),
                Err(ReadlineError::Interrupted) => reporter.message("^C"),
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::warn!(error = %e, "cannot add history entry");
        }
    }
}
