//! Last-result memory and the placeholder substitution that uses it

use crate::core::outcome::{format_value, Outcome};
use serde::{Deserialize, Serialize};

/// Remembers the last finite result for reuse through a placeholder token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    token: String,
    stored: String,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Default placeholder token
    pub const DEFAULT_TOKEN: &'static str = "me";

    /// Text held before any result was remembered
    pub const INITIAL: &'static str = "0";

    /// Creates a memory using the default token
    #[must_use]
    pub fn new() -> Self {
        Self::with_token(Self::DEFAULT_TOKEN)
    }

    /// Creates a memory with a custom placeholder token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            stored: Self::INITIAL.to_string(),
        }
    }

    /// Placeholder token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Text that replaces the token
    #[must_use]
    pub fn stored(&self) -> &str {
        &self.stored
    }

    /// Stores the value of a finite outcome. Negative values are kept in
    /// brackets so they stay valid after an operator. Returns whether
    /// anything was stored.
    pub fn remember(&mut self, outcome: &Outcome) -> bool {
        let Some(value) = outcome.value() else {
            return false;
        };
        let text = format_value(value);
        self.stored = if text.starts_with('-') {
            format!("({text})")
        } else {
            text
        };
        true
    }

    /// Resets to the initial value
    pub fn clear(&mut self) {
        Self::INITIAL.clone_into(&mut self.stored);
    }

    /// Replaces every case-insensitive occurrence of the token in `input`
    #[must_use]
    pub fn substitute(&self, input: &str) -> String {
        let needle: Vec<char> = self.token.chars().collect();
        if needle.is_empty() {
            return input.to_string();
        }

        let haystack: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len());
        let mut i = 0;
        while i < haystack.len() {
            let matches = haystack
                .get(i..i + needle.len())
                .is_some_and(|window| chars_eq_ignore_case(window, &needle));
            if matches {
                out.push_str(&self.stored);
                i += needle.len();
            } else {
                out.push(haystack[i]);
                i += 1;
            }
        }
        out
    }
}

fn chars_eq_ignore_case(a: &[char], b: &[char]) -> bool {
    a.iter()
        .zip(b)
        .all(|(x, y)| x.to_lowercase().eq(y.to_lowercase()))
}
