//! Binary operators and their IEEE-754 semantics

use serde::{Deserialize, Serialize};

/// The four supported operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Returns the operator symbol
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Maps an operator character, `None` for anything else
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// True for `+` and `-`
    #[must_use]
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// True for `*` and `/`
    #[must_use]
    pub const fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    /// Applies the operator. Division by zero follows IEEE-754 (±inf, or NaN for 0/0).
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

/// Returns true for characters the tokenizer treats as operators
#[must_use]
pub const fn is_operator_char(c: char) -> bool {
    Operation::from_char(c).is_some()
}
