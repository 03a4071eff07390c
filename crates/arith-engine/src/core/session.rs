//! One evaluation of one expression
//!
//! A session runs the tokenizer, the bracket validator and, only when both
//! came back clean, the evaluator. It is built fresh for every expression.

use crate::core::brackets::BracketValidator;
use crate::core::errors::{ErrorCollector, ErrorKind};
use crate::core::evaluator::{Evaluator, SpecialValues};
use crate::core::parser::{wrap, Token, Tokenizer};
use crate::core::EngineConfig;

/// Evaluation state for a single normalized expression
#[derive(Debug, Clone)]
pub struct ExpressionSession {
    expression: String,
    tokens: Vec<Token>,
    errors: ErrorCollector,
    special: SpecialValues,
    result: f64,
}

impl ExpressionSession {
    /// Computes a normalized expression with the default configuration
    #[must_use]
    pub fn compute(expression: &str) -> Self {
        Self::compute_with(expression, &EngineConfig::default())
    }

    /// Computes a normalized expression.
    ///
    /// Evaluation is skipped, and the result left as NaN, when tokenizing
    /// or bracket validation reported anything.
    #[must_use]
    pub fn compute_with(expression: &str, config: &EngineConfig) -> Self {
        let wrapped = wrap(expression);
        let tokenized = Tokenizer::new(&wrapped).tokenize();
        let mut errors = ErrorCollector::from(tokenized.errors);
        let structural = BracketValidator::with_max_depth(config.max_nesting_depth)
            .validate(&tokenized.tokens);
        errors.extend(structural);

        tracing::debug!(
            expression,
            tokens = tokenized.tokens.len(),
            errors = errors.len(),
            "tokenized and validated"
        );

        let mut session = Self {
            expression: wrapped,
            tokens: tokenized.tokens,
            errors,
            special: SpecialValues::default(),
            result: f64::NAN,
        };

        if session.errors.is_empty() {
            let evaluation = Evaluator::new(&session.tokens).evaluate();
            session.errors.extend(evaluation.errors.into_vec());
            session.special = evaluation.special;
            session.result = evaluation.value;
        }

        session
    }

    /// Final value; only trustworthy when [`Self::error_count`] is zero
    #[must_use]
    pub const fn result(&self) -> f64 {
        self.result
    }

    /// Errors in discovery order
    #[must_use]
    pub const fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    /// Number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True when no stage reported anything
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Counts errors of one kind
    #[must_use]
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.count_of(kind)
    }

    /// Offset where a sub-result first became NaN
    #[must_use]
    pub const fn first_nan_position(&self) -> Option<usize> {
        self.special.first_nan
    }

    /// Offset where a sub-result first became infinite
    #[must_use]
    pub const fn first_infinity_position(&self) -> Option<usize> {
        self.special.first_infinity
    }

    /// The expression including the synthetic outer brackets
    #[must_use]
    pub fn wrapped_expression(&self) -> &str {
        &self.expression
    }

    /// The expression as the user's normalized input, without the synthetic brackets
    #[must_use]
    pub fn expression(&self) -> &str {
        self.expression
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(self.expression.as_str())
    }

    /// Tokens of the wrapped expression
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
