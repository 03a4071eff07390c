//! Expression engine: normalization, tokenizing, bracket validation and evaluation
//!
//! [`Engine::process`] is the front door. The stages are public so callers
//! and tests can drive them one at a time.

pub mod brackets;
pub mod errors;
pub mod evaluator;
pub mod history;
pub mod memory;
mod operations;
pub mod outcome;
pub mod parser;
pub mod preprocess;
pub mod session;

pub use operations::{is_operator_char, Operation};

use brackets::{DEFAULT_MAX_NESTING_DEPTH, MAX_NESTING_DEPTH_CEILING};
use outcome::Outcome;
use serde::{Deserialize, Serialize};
use session::ExpressionSession;
use thiserror::Error;

/// Result type for engine setup
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while configuring the engine.
///
/// Expression problems are never returned as errors; they are data on the
/// [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A configuration value is out of range
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest allowed bracket nesting, counting the synthetic outer pair
    pub max_nesting_depth: usize,
    /// Placeholder replaced by the last finite result
    pub memory_token: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            memory_token: memory::Memory::DEFAULT_TOKEN.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the memory placeholder
    #[must_use]
    pub fn with_memory_token(mut self, token: impl Into<String>) -> Self {
        self.memory_token = token.into();
        self
    }

    /// Checks that the settings can run an evaluation.
    ///
    /// The memory token must not contain characters that are part of the
    /// expression alphabet, or substitution would rewrite real input.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=MAX_NESTING_DEPTH_CEILING).contains(&self.max_nesting_depth) {
            return Err(EngineError::InvalidConfig(format!(
                "max_nesting_depth must be between 1 and {MAX_NESTING_DEPTH_CEILING}"
            )));
        }
        if self.memory_token.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "memory_token must not be empty".into(),
            ));
        }
        if let Some(c) = self.memory_token.chars().find(|c| {
            c.is_ascii_digit() || is_operator_char(*c) || "()[]{}.,".contains(*c) || c.is_whitespace()
        }) {
            return Err(EngineError::InvalidConfig(format!(
                "memory_token contains expression character '{c}'"
            )));
        }
        Ok(())
    }
}

/// Runs the whole pipeline for one expression at a time
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine after validating `config`
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalizes `raw` and runs a fresh session, or `None` when nothing is left
    #[must_use]
    pub fn session(&self, raw: &str) -> Option<ExpressionSession> {
        let normalized = preprocess::normalize(raw);
        if normalized.is_empty() {
            return None;
        }
        Some(ExpressionSession::compute_with(&normalized, &self.config))
    }

    /// Processes raw user input into a classified outcome
    #[must_use]
    pub fn process(&self, raw: &str) -> Outcome {
        let outcome = self
            .session(raw)
            .map_or(Outcome::Empty, |session| Outcome::from_session(&session));
        tracing::debug!(input = raw, outcome = %outcome.summary(), "processed expression");
        outcome
    }
}
