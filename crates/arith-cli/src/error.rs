//! CLI failures, as opposed to expression errors which are ordinary outcomes

use arith_engine::core::EngineError;
use thiserror::Error;

/// Result alias used throughout the binary
pub type CliResult<T> = Result<T, CliError>;

/// Anything that stops the CLI from doing its job
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file unreadable or rejected
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Terminal or pipe I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal line editor failed
    #[error("Line editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    /// The evaluating backend could not be reached or went away
    #[error("Transport error: {message}")]
    Transport {
        /// What failed
        message: String,
    },

    /// A line on the wire could not be understood
    #[error("Protocol error: {message}")]
    Protocol {
        /// What was unexpected
        message: String,
    },

    /// Command-line arguments that parse but make no sense together
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Which argument and why
        message: String,
    },
}

impl CliError {
    /// [`CliError::Config`]
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// [`CliError::Transport`]
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// [`CliError::Protocol`]
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// [`CliError::InvalidArgument`]
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        Self::config(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::protocol(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let cases = [
            (CliError::config("depth is 0"), "Configuration error: depth is 0"),
            (CliError::transport("pipe closed"), "Transport error: pipe closed"),
            (CliError::protocol("stray reply"), "Protocol error: stray reply"),
            (
                CliError::invalid_argument("--quiet with --verbose"),
                "Invalid argument: --quiet with --verbose",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_broken_pipe_is_io() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_editor_failure() {
        let err: CliError = rustyline::error::ReadlineError::Interrupted.into();
        assert!(matches!(err, CliError::Editor(_)));
        assert!(err.to_string().starts_with("Line editor error: "));
    }

    #[test]
    fn test_engine_rejection_is_config() {
        let err: CliError = EngineError::InvalidConfig("depth".into()).into();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("depth"));
    }

    #[test]
    fn test_bad_json_is_protocol() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: CliError = json_err.into();
        assert!(matches!(err, CliError::Protocol { .. }));
    }
}
