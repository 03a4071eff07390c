//! Interactive session
//!
//! Handles the `help`, `history` and `quit`/`exit` commands, substitutes the
//! memory placeholder, and sends everything else to the backend.

use crate::error::CliResult;
use crate::input::LineSource;
use crate::output::{Reporter, GENERIC_FAILURE};
use crate::transport::Backend;
use arith_engine::core::history::History;
use arith_engine::core::memory::Memory;
use arith_engine::core::outcome::Outcome;
use std::process::ExitCode;

/// Shown when the user just presses enter
pub const EMPTY_INPUT_NOTICE: &str = "Not empty expression needed";

/// What one line of input produced
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Blank line
    Blank,
    /// Text for the user
    Message(String),
    /// The backend evaluated an expression
    Evaluated(Outcome),
    /// The user asked to leave
    Exit,
}

/// REPL state: backend, memory and history
#[derive(Debug)]
pub struct Repl {
    backend: Box<dyn Backend>,
    memory: Memory,
    history: History,
}

impl Repl {
    /// Creates a session over `backend`
    #[must_use]
    pub fn new(backend: Box<dyn Backend>, memory: Memory, history: History) -> Self {
        Self {
            backend,
            memory,
            history,
        }
    }

    /// Memory state
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Past expressions
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Usage text
    #[must_use]
    pub fn help_text(&self) -> String {
        format!(
            "Supported operations: + - * /, and '-' as a unary sign\n\
             Use either ',' or '.' as the decimal point\n\
             Brackets (), [] and {{}} are interchangeable\n\
             Spaces are ignored\n\
             number(...), (...)number and (...)(...) are multiplications\n\
             '{}' stands for the last finite result\n\
             Commands: help, history, quit",
            self.memory.token()
        )
    }

    /// Processes one line of input
    pub fn process_line(&mut self, line: &str) -> CliResult<Step> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Step::Blank);
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(Step::Exit),
            "help" => return Ok(Step::Message(self.help_text())),
            "history" => {
                let listing = if self.history.is_empty() {
                    "No history yet".to_string()
                } else {
                    self.history.listing()
                };
                return Ok(Step::Message(listing));
            }
            _ => {}
        }

        let expression = self.memory.substitute(trimmed);
        let outcome = self.backend.evaluate(&expression)?;
        self.memory.remember(&outcome);
        self.history.record(&expression, outcome.clone());
        Ok(Step::Evaluated(outcome))
    }

    /// Runs the prompt loop until `quit`, end of input or a transport failure.
    ///
    /// A transport failure is shown as one generic message and ends the
    /// session with a failing exit code.
    pub fn run<S: LineSource>(&mut self, input: &mut S, reporter: &Reporter) -> ExitCode {
        reporter.banner();

        loop {
            let line = match input.next_line(reporter) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    reporter.message("");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot read input");
                    return self.fail(reporter);
                }
            };
            if !line.trim().is_empty() {
                input.remember(line.trim());
            }

            match self.process_line(&line) {
                Ok(Step::Blank) => reporter.warning(EMPTY_INPUT_NOTICE),
                Ok(Step::Message(text)) => reporter.message(&text),
                Ok(Step::Evaluated(outcome)) => reporter.outcome(&outcome),
                Ok(Step::Exit) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "evaluation failed");
                    return self.fail(reporter);
                }
            }
        }

        match self.backend.shutdown() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::warn!(error = %e, "backend shutdown failed");
                reporter.failure(GENERIC_FAILURE);
                ExitCode::FAILURE
            }
        }
    }

    fn fail(&mut self, reporter: &Reporter) -> ExitCode {
        reporter.failure(GENERIC_FAILURE);
        if let Err(e) = self.backend.shutdown() {
            tracing::debug!(error = %e, "shutdown after failure");
        }
        ExitCode::FAILURE
    }
}
