//! Positioned syntax errors and the collector that keeps them in discovery order
//!
//! Errors are data, never control flow: every stage appends to an
//! [`ErrorCollector`] and keeps going.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kind without payload, for matching and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unmatched closing bracket
    ClosingBrackets,
    /// Operator in an invalid position, or a factor that is not a number
    UnexpectedOperator,
    /// Second decimal separator in one literal
    SecondPoint,
    /// Character outside the expression alphabet
    UnsupportedSymbol,
    /// Opening brackets left unclosed
    OpeningBrackets,
    /// Bracket nesting beyond the configured limit
    NestingTooDeep,
    /// Structural inconsistency found during evaluation
    UnknownError,
}

/// A single diagnostic produced while processing an expression.
///
/// Positions are character offsets into the expression wrapped in its
/// synthetic outer bracket pair, so the first user character sits at 1.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxError {
    /// Closing bracket with no opener; only the first one is reported
    #[error("Error: closing bracket at position {position} doesn't have an open bracket! Check your brackets, no more bracket errors will be shown")]
    ClosingBrackets {
        /// Offset of the bracket
        position: usize,
    },

    /// Operator that cannot appear where it does
    #[error("Error: unexpected '{symbol}' operator at position {position}")]
    UnexpectedOperator {
        /// Offending character
        symbol: char,
        /// Offset of the character
        position: usize,
    },

    /// Decimal separator repeated inside a single number
    #[error("Error: second or more point in number at position {position}")]
    SecondPoint {
        /// Offset of the extra separator
        position: usize,
    },

    /// Character the tokenizer does not understand
    #[error("Error: unsupported symbol '{symbol}' at position {position}")]
    UnsupportedSymbol {
        /// Offending character
        symbol: char,
        /// Offset of the character
        position: usize,
    },

    /// Opening brackets still open at the end of input
    #[error("Error: {missing} more closing brackets expected")]
    OpeningBrackets {
        /// How many closers are missing (a count, not an offset)
        missing: usize,
    },

    /// Group opened deeper than the evaluator is allowed to recurse
    #[error("Error: brackets nested deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// Offset of the first bracket past the limit
        position: usize,
        /// Configured maximum depth
        limit: usize,
    },

    /// Leftover tokens or a missing closer found while evaluating
    #[error("Error: something went wrong at position {position}")]
    UnknownError {
        /// Offset where the parser gave up
        position: usize,
    },
}

impl SyntaxError {
    /// Returns the payload-free kind
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ClosingBrackets { .. } => ErrorKind::ClosingBrackets,
            Self::UnexpectedOperator { .. } => ErrorKind::UnexpectedOperator,
            Self::SecondPoint { .. } => ErrorKind::SecondPoint,
            Self::UnsupportedSymbol { .. } => ErrorKind::UnsupportedSymbol,
            Self::OpeningBrackets { .. } => ErrorKind::OpeningBrackets,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Self::UnknownError { .. } => ErrorKind::UnknownError,
        }
    }

    /// Character offset of the error, if the kind carries one.
    ///
    /// `OpeningBrackets` carries a count instead and returns `None`.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::ClosingBrackets { position }
            | Self::UnexpectedOperator { position, .. }
            | Self::SecondPoint { position }
            | Self::UnsupportedSymbol { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::UnknownError { position } => Some(*position),
            Self::OpeningBrackets { .. } => None,
        }
    }

    /// Offending character, for the kinds that record one
    #[must_use]
    pub const fn symbol(&self) -> Option<char> {
        match self {
            Self::UnexpectedOperator { symbol, .. } | Self::UnsupportedSymbol { symbol, .. } => {
                Some(*symbol)
            }
            _ => None,
        }
    }

    /// True for bracket-balance errors
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ClosingBrackets { .. } | Self::OpeningBrackets { .. } | Self::NestingTooDeep { .. }
        )
    }
}

/// Ordered list of errors for one expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCollector {
    errors: Vec<SyntaxError>,
}

impl ErrorCollector {
    /// Creates an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error
    pub fn push(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    /// Appends every error from `other`, preserving order
    pub fn extend(&mut self, other: impl IntoIterator<Item = SyntaxError>) {
        self.errors.extend(other);
    }

    /// Number of errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when nothing has been reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error at `index` in discovery order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SyntaxError> {
        self.errors.get(index)
    }

    /// Iterates in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.errors.iter()
    }

    /// Counts errors of one kind
    #[must_use]
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }

    /// Every message, one per line, each terminated by a newline
    #[must_use]
    pub fn combined(&self) -> String {
        self.errors.iter().map(|e| format!("{e}\n")).collect()
    }

    /// Consumes the collector
    #[must_use]
    pub fn into_vec(self) -> Vec<SyntaxError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ErrorCollector {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<Vec<SyntaxError>> for ErrorCollector {
    fn from(errors: Vec<SyntaxError>) -> Self {
        Self { errors }
    }
}
