//! Bracket balance and nesting checks over a token sequence

use crate::core::errors::SyntaxError;
use crate::core::parser::{Token, TokenKind};

/// Default maximum bracket depth, counting the synthetic outer pair
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Highest configurable depth; each level costs several evaluator stack frames
pub const MAX_NESTING_DEPTH_CEILING: usize = 1024;

/// Structural checker, independent of lexical errors and of evaluation
#[derive(Debug, Clone, Copy)]
pub struct BracketValidator {
    max_depth: usize,
}

impl Default for BracketValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketValidator {
    /// Creates a validator with the default nesting limit
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Creates a validator with a custom nesting limit
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Configured nesting limit
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Walks the tokens and returns structural errors in discovery order.
    ///
    /// The first token is the synthetic opener and the last the synthetic
    /// closer: the opener is not counted, and the closer is never reported
    /// as excess. Only the first excess `)` is reported, and the missing
    /// closer count is suppressed once it has been.
    #[must_use]
    pub fn validate(&self, tokens: &[Token]) -> Vec<SyntaxError> {
        let mut errors = Vec::new();
        let mut opened: isize = -1;
        let mut closed: isize = 0;
        let mut closing_reported = false;
        let mut depth: usize = 0;
        let mut depth_reported = false;
        let last = tokens.len().saturating_sub(1);

        for (index, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::LeftParen => {
                    opened += 1;
                    depth += 1;
                    if depth > self.max_depth && !depth_reported {
                        errors.push(SyntaxError::NestingTooDeep {
                            position: token.offset,
                            limit: self.max_depth,
                        });
                        depth_reported = true;
                    }
                }
                TokenKind::RightParen => {
                    closed += 1;
                    depth = depth.saturating_sub(1);
                    if closed > opened && !closing_reported && index != last {
                        errors.push(SyntaxError::ClosingBrackets {
                            position: token.offset,
                        });
                        closing_reported = true;
                    }
                }
                TokenKind::Number(_) | TokenKind::Operator(_) => {}
            }
        }

        let unclosed = opened + 1 - closed;
        if unclosed > 0 && !closing_reported {
            errors.push(SyntaxError::OpeningBrackets {
                missing: unclosed.unsigned_abs(),
            });
        }

        errors
    }
}
