//! Recursive-descent evaluator that computes while it parses
//!
//! Grammar:
//! ```text
//! expression    ::= term (('+' | '-') term)*
//! term          ::= signed_factor (('*' | '/') signed_factor)*
//! signed_factor ::= ('-' | '+')? factor
//! factor        ::= '(' expression ')' | NUMBER
//! ```
//!
//! The token stream must start with the synthetic outer `(` and pass the
//! bracket validator first; recursion depth equals bracket depth.

use crate::core::errors::{ErrorCollector, SyntaxError};
use crate::core::operations::Operation;
use crate::core::parser::{Token, TokenKind};
use serde::{Deserialize, Serialize};

/// First offsets at which a running value turned NaN or infinite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialValues {
    /// Offset of the first NaN sub-result
    pub first_nan: Option<usize>,
    /// Offset of the first infinite sub-result
    pub first_infinity: Option<usize>,
}

impl SpecialValues {
    /// Records `value` at `position` if it is the first of its class.
    ///
    /// An infinite value is checked before NaN; a value is one or the other.
    pub fn observe(&mut self, value: f64, position: usize) {
        if value.is_infinite() {
            self.first_infinity.get_or_insert(position);
        } else if value.is_nan() {
            self.first_nan.get_or_insert(position);
        }
    }
}

/// Evaluator over a borrowed token slice.
///
/// `cursor` indexes the next token; `position` is the character offset just
/// past the last consumed token.
#[derive(Debug)]
pub struct Evaluator<'a> {
    tokens: &'a [Token],
    cursor: usize,
    position: usize,
    errors: ErrorCollector,
    special: SpecialValues,
}

/// What one evaluation produced
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Final value; meaningless when `errors` is non-empty
    pub value: f64,
    /// Errors found while evaluating
    pub errors: ErrorCollector,
    /// First NaN / infinity positions
    pub special: SpecialValues,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator positioned before the first token
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            position: 0,
            errors: ErrorCollector::new(),
            special: SpecialValues::default(),
        }
    }

    /// Parses and evaluates the whole token stream
    #[must_use]
    pub fn evaluate(mut self) -> EvaluationResult {
        let value = self.expression();
        if self.cursor != self.tokens.len() {
            self.errors.push(SyntaxError::UnknownError {
                position: self.position,
            });
        }
        tracing::trace!(
            value,
            consumed = self.cursor,
            total = self.tokens.len(),
            "evaluation finished"
        );
        EvaluationResult {
            value,
            errors: self.errors,
            special: self.special,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        self.position = token.end();
        Some(token)
    }

    fn peek_operation(&self) -> Option<Operation> {
        match self.current()?.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    fn expression(&mut self) -> f64 {
        let mut left = self.term();
        let checkpoint = self.position;

        while let Some(op) = self.peek_operation().filter(Operation::is_additive) {
            self.advance();
            let right = self.term();
            left = op.apply(left, right);
        }

        self.special.observe(left, checkpoint);
        left
    }

    fn term(&mut self) -> f64 {
        let mut left = self.signed_factor();
        let checkpoint = self.position;

        while let Some(op) = self.peek_operation().filter(Operation::is_multiplicative) {
            self.advance();
            let right = self.signed_factor();
            left = op.apply(left, right);
        }

        self.special.observe(left, checkpoint);
        left
    }

    fn signed_factor(&mut self) -> f64 {
        let start = self.position;
        let value = match self.peek_operation() {
            Some(Operation::Subtract) => {
                self.advance();
                -self.factor()
            }
            Some(Operation::Add) => {
                self.advance();
                self.factor()
            }
            _ => self.factor(),
        };
        self.special.observe(value, start);
        value
    }

    fn factor(&mut self) -> f64 {
        let Some(token) = self.current() else {
            self.errors.push(SyntaxError::UnknownError {
                position: self.position,
            });
            return f64::NAN;
        };

        if token.is_left_paren() {
            self.advance();
            let value = self.expression();
            if self.current().is_some_and(Token::is_right_paren) {
                self.advance();
                self.special.observe(value, self.position);
                return value;
            }
            self.errors.push(SyntaxError::UnknownError {
                position: self.position,
            });
            return f64::NAN;
        }

        let start = token.offset;
        self.advance();
        if let Some(value) = token.number_value() {
            self.special.observe(value, start);
            return value;
        }
        self.errors.push(SyntaxError::UnexpectedOperator {
            symbol: token.first_char(),
            position: start,
        });
        f64::NAN
    }
}
