//! Console output for results, notices and failures

use arith_engine::core::outcome::{format_value, Outcome};
use console::{style, Term};

/// Text of the interactive prompt
pub const PROMPT: &str = "Your expression: ";

/// Printed when a transport failure ends the session
pub const GENERIC_FAILURE: &str = "Something went wrong, sorry!";

/// Renders an outcome the way the front end shows it.
///
/// Finite values are prefixed with `Result: `. With color on, warnings are
/// yellow and error lines red; the text is otherwise identical.
#[must_use]
pub fn render_outcome(outcome: &Outcome, use_color: bool) -> String {
    match outcome {
        Outcome::Value(v) => format!("Result: {}", format_value(*v)),
        Outcome::Empty => paint_warning(&outcome.to_string(), use_color),
        Outcome::NotANumber { .. } | Outcome::Infinite { .. } => {
            let text = outcome.to_string();
            match text.split_once('\n') {
                Some((warning, result)) => {
                    format!("{}\n{result}", paint_warning(warning, use_color))
                }
                None => text,
            }
        }
        Outcome::Rejected { .. } => {
            let text = outcome.to_string();
            let mut lines = text.lines();
            let mut rendered = lines.next().unwrap_or_default().to_string();
            for line in lines {
                rendered.push('\n');
                rendered.push_str(&paint_error(line, use_color));
            }
            rendered
        }
    }
}

fn paint_warning(text: &str, use_color: bool) -> String {
    if use_color {
        style(text).yellow().to_string()
    } else {
        text.to_string()
    }
}

fn paint_error(text: &str, use_color: bool) -> String {
    if use_color {
        style(text).red().to_string()
    } else {
        text.to_string()
    }
}

/// Writes front-end output to the terminal
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print the REPL greeting
    pub fn banner(&self) {
        if self.quiet {
            return;
        }
        let title = format!("arith v{}", env!("CARGO_PKG_VERSION"));
        let title = if self.use_color {
            style(title).bold().to_string()
        } else {
            title
        };
        let _ = self.out.write_line(&title);
        let _ = self
            .out
            .write_line("Type 'help' for usage, 'quit' to exit.");
    }

    /// The prompt, styled when color is on
    #[must_use]
    pub fn prompt_text(&self) -> String {
        if self.use_color {
            style(PROMPT).cyan().to_string()
        } else {
            PROMPT.to_string()
        }
    }

    /// Print the prompt without a line break
    pub fn prompt(&self) {
        let _ = self.out.write_str(&self.prompt_text());
        let _ = self.out.flush();
    }

    /// Print an evaluation outcome
    pub fn outcome(&self, outcome: &Outcome) {
        let _ = self.out.write_line(&render_outcome(outcome, self.use_color));
    }

    /// Print informational text
    pub fn message(&self, message: &str) {
        let _ = self.out.write_line(message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        let _ = self.out.write_line(&paint_warning(message, self.use_color));
    }

    /// Print a failure message; shown even in quiet mode
    pub fn failure(&self, message: &str) {
        let message = if self.use_color {
            style(message).red().bold().to_string()
        } else {
            message.to_string()
        };
        let _ = self.err.write_line(&message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use arith_engine::core::errors::SyntaxError;

    #[test]
    fn test_render_value() {
        assert_eq!(render_outcome(&Outcome::Value(6.0), false), "Result: 6");
        assert_eq!(render_outcome(&Outcome::Value(-0.5), false), "Result: -0.5");
    }

    #[test]
    fn test_render_special_values() {
        assert_eq!(
            render_outcome(&Outcome::NotANumber { position: 2 }, false),
            "Warning! Expression became NaN while processing operand at position 2\nResult: NaN"
        );
        assert_eq!(
            render_outcome(
                &Outcome::Infinite {
                    position: 3,
                    negative: true
                },
                false
            ),
            "Warning! Expression became Infinite while processing operand at position 3\nResult: -Infinite"
        );
    }

    #[test]
    fn test_render_rejected() {
        let outcome = Outcome::Rejected {
            expression: "123)+23".into(),
            errors: vec![SyntaxError::ClosingBrackets { position: 4 }],
        };
        let rendered = render_outcome(&outcome, false);
        assert_eq!(rendered, outcome.to_string());
        assert!(rendered.starts_with("Your trimmed expression: 123)+23\nError: closing bracket"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render_outcome(&Outcome::Empty, false),
            "Your expression is equivalent to empty, try another!"
        );
    }

    #[test]
    fn test_colored_rendering_keeps_text() {
        let outcome = Outcome::NotANumber { position: 2 };
        let colored = render_outcome(&outcome, true);
        assert!(colored.contains("Warning! Expression became NaN"));
        assert!(colored.ends_with("Result: NaN"));
    }

    #[test]
    fn test_reporter_flags() {
        let reporter = Reporter::new(true, true);
        assert!(reporter.use_color);
        assert!(reporter.quiet);
        let default = Reporter::default();
        assert!(!default.use_color);
        assert!(!default.quiet);
    }
}
