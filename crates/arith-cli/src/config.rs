//! Settings for the `arith` binary
//!
//! Built in three layers: defaults, then an optional YAML file
//! (`--config`), then command-line flags applied in `main`.
//!
//! ```yaml
//! verbosity: normal      # quiet | normal | verbose | debug
//! color: auto            # auto | always | never
//! history_size: 100
//! engine:
//!   max_nesting_depth: 256
//!   memory_token: me
//! ```

use crate::error::{CliError, CliResult};
use arith_engine::core::history::History;
use arith_engine::core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How chatty the binary is, on stdout and in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// No banner, errors only in the log
    Quiet,
    /// Banner, warnings in the log
    #[default]
    Normal,
    /// Stage summaries in the log
    Verbose,
    /// Everything
    Debug,
}

impl Verbosity {
    /// `-v` gives `Verbose`, `-vv` and beyond give `Debug`
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// True for [`Verbosity::Quiet`]
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// When to style output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Even when piped
    Always,
    /// Only on a terminal
    #[default]
    Auto,
    /// Plain text
    Never,
}

impl ColorChoice {
    /// Resolves `Auto` against stdout
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Everything the binary can be configured with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Output and log level
    pub verbosity: Verbosity,
    /// Styling
    pub color: ColorChoice,
    /// Entries kept by the REPL history
    pub history_size: usize,
    /// Passed to every engine, in process or child
    pub engine: EngineConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            history_size: History::DEFAULT_CAPACITY,
            engine: EngineConfig::default(),
        }
    }
}

impl CliConfig {
    /// Parses YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml_ng::from_str(text).map_err(|e| CliError::config(e.to_string()))?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_counts() {
        let levels: Vec<Verbosity> = (0..4).map(Verbosity::from_count).collect();
        assert_eq!(
            levels,
            vec![
                Verbosity::Normal,
                Verbosity::Verbose,
                Verbosity::Debug,
                Verbosity::Debug
            ]
        );
    }

    #[test]
    fn test_quiet_filters_to_errors() {
        assert!(Verbosity::Quiet.is_quiet());
        assert!(!Verbosity::default().is_quiet());
        assert_eq!(Verbosity::Quiet.log_filter(), "error");
        assert_eq!(Verbosity::default().log_filter(), "warn");
        assert_eq!(Verbosity::Verbose.log_filter(), "debug");
        assert_eq!(Verbosity::Debug.log_filter(), "trace");
    }

    #[test]
    fn test_forced_color_choices() {
        assert!(ColorChoice::Always.should_color());
        assert!(!ColorChoice::Never.should_color());
    }

    #[test]
    fn test_engine_defaults_carry_through() {
        let config = CliConfig::default();
        assert_eq!(config.history_size, 100);
        assert_eq!(config.engine.memory_token, "me");
        assert_eq!(config.engine.max_nesting_depth, 256);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config =
            CliConfig::from_yaml("history_size: 5\nengine:\n  memory_token: last\n").unwrap();
        assert_eq!(config.history_size, 5);
        assert_eq!(config.engine.memory_token, "last");
        assert_eq!(config.engine.max_nesting_depth, 256);
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_blank_document() {
        assert_eq!(CliConfig::from_yaml("  \n").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_lowercase_enum_names() {
        let config = CliConfig::from_yaml("verbosity: quiet\ncolor: never\n").unwrap();
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.color, ColorChoice::Never);
        assert!(CliConfig::from_yaml("color: Never\n").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = CliConfig::from_yaml("history_size: [1, 2]").unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_engine_section_validated() {
        let err = CliConfig::from_yaml("engine:\n  max_nesting_depth: 0\n").unwrap_err();
        assert!(err.to_string().contains("max_nesting_depth"));

        let err = CliConfig::from_yaml("engine:\n  memory_token: \"m+\"\n").unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arith.yaml");
        std::fs::write(&path, "history_size: 2\n").unwrap();
        assert_eq!(CliConfig::load(&path).unwrap().history_size, 2);

        let err = CliConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: cannot read"));
    }
}
