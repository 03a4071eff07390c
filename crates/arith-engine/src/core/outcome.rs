//! Classified result of processing one expression, and its rendering

use crate::core::errors::SyntaxError;
use crate::core::session::ExpressionSession;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown when normalization leaves nothing to evaluate
pub const EMPTY_EXPRESSION_MESSAGE: &str = "Your expression is equivalent to empty, try another!";

/// What the user gets back for one expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Normalization produced an empty string
    Empty,
    /// Finite result
    Value(f64),
    /// Evaluation produced NaN
    NotANumber {
        /// Offset where NaN first appeared
        position: usize,
    },
    /// Evaluation overflowed or divided by zero
    Infinite {
        /// Offset where infinity first appeared
        position: usize,
        /// True for negative infinity
        negative: bool,
    },
    /// At least one error was reported
    Rejected {
        /// Normalized expression, without the synthetic brackets
        expression: String,
        /// Errors in discovery order
        errors: Vec<SyntaxError>,
    },
}

impl Outcome {
    /// Classifies a finished session.
    ///
    /// Errors take priority over NaN, and NaN over infinity.
    #[must_use]
    pub fn from_session(session: &ExpressionSession) -> Self {
        let result = session.result();
        if !session.is_clean() {
            Self::Rejected {
                expression: session.expression().to_string(),
                errors: session.errors().iter().cloned().collect(),
            }
        } else if result.is_nan() {
            Self::NotANumber {
                position: session.first_nan_position().unwrap_or_default(),
            }
        } else if result.is_infinite() {
            Self::Infinite {
                position: session.first_infinity_position().unwrap_or_default(),
                negative: result.is_sign_negative(),
            }
        } else {
            Self::Value(result)
        }
    }

    /// The finite value, if there is one
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// True for `Value`, `NotANumber` and `Infinite`: evaluation ran without errors
    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        matches!(
            self,
            Self::Value(_) | Self::NotANumber { .. } | Self::Infinite { .. }
        )
    }

    /// Errors carried by a rejected outcome
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        match self {
            Self::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }

    /// One-line form for history listings
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Empty => "empty".to_string(),
            Self::Value(v) => format_value(*v),
            Self::NotANumber { .. } => "NaN".to_string(),
            Self::Infinite { negative, .. } => infinity_label(*negative).to_string(),
            Self::Rejected { errors, .. } => match errors.len() {
                1 => "1 error".to_string(),
                n => format!("{n} errors"),
            },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str(EMPTY_EXPRESSION_MESSAGE),
            Self::Value(v) => f.write_str(&format_value(*v)),
            Self::NotANumber { position } => write!(
                f,
                "Warning! Expression became NaN while processing operand at position {position}\nResult: NaN"
            ),
            Self::Infinite { position, negative } => write!(
                f,
                "Warning! Expression became Infinite while processing operand at position {position}\nResult: {}",
                infinity_label(*negative)
            ),
            Self::Rejected { expression, errors } => {
                write!(f, "Your trimmed expression: {expression}")?;
                for error in errors {
                    write!(f, "\n{error}")?;
                }
                Ok(())
            }
        }
    }
}

const fn infinity_label(negative: bool) -> &'static str {
    if negative {
        "-Infinite"
    } else {
        "Infinite"
    }
}

/// Formats a finite value the way results are shown and remembered.
///
/// Negative zero prints as `0`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
