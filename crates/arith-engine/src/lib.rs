//! Arith Engine - error-tolerant arithmetic expression evaluation
//!
//! Expressions use `+ - * /`, unary minus, any of the bracket kinds
//! `() [] {}` and either `.` or `,` as the decimal separator. Instead of
//! stopping at the first mistake, the engine keeps going and reports every
//! problem it can find with the character offset where it happened.
//!
//! # Pipeline
//!
//! 1. [`core::preprocess::normalize`] unifies brackets, drops empty groups and
//!    whitespace, and inserts implicit multiplication.
//! 2. [`core::parser::Tokenizer`] splits the expression, reporting misplaced
//!    operators, repeated separators and unsupported symbols.
//! 3. [`core::brackets::BracketValidator`] checks bracket balance.
//! 4. [`core::evaluator::Evaluator`] runs only on a clean expression and
//!    tracks where NaN or infinity first appeared.
//!
//! # Example
//!
//! ```rust
//! use arith_engine::prelude::*;
//!
//! let engine = Engine::new();
//!
//! assert_eq!(engine.process("2(3 + 4)"), Outcome::Value(14.0));
//!
//! let outcome = engine.process("(2+3))");
//! assert_eq!(outcome.errors().len(), 1);
//! assert!(outcome.to_string().starts_with("Your trimmed expression: (2+3))"));
//!
//! assert_eq!(engine.process("( )"), Outcome::Empty);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::brackets::BracketValidator;
    pub use crate::core::errors::{ErrorCollector, ErrorKind, SyntaxError};
    pub use crate::core::evaluator::{EvaluationResult, Evaluator, SpecialValues};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::memory::Memory;
    pub use crate::core::outcome::{format_value, Outcome, EMPTY_EXPRESSION_MESSAGE};
    pub use crate::core::parser::{Token, TokenKind, Tokenizer};
    pub use crate::core::preprocess::normalize;
    pub use crate::core::session::ExpressionSession;
    pub use crate::core::{Engine, EngineConfig, EngineError, EngineResult, Operation};
}
