//! Command line of the `arith` binary

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// arith: error-tolerant calculator for + - * / expressions
#[derive(Parser, Debug)]
#[command(name = "arith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress banners and notices)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// What to run
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session
    Repl(ReplArgs),

    /// Evaluate one expression and exit
    Eval(EvalArgs),

    /// Run as a backend, answering JSON-lines requests on stdin
    Serve,
}

/// `arith repl` options
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Where expressions are evaluated
    #[arg(short, long, value_enum, default_value_t = BackendArg::InProcess)]
    pub backend: BackendArg,
}

/// `arith eval` options
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Expression; several words are joined with spaces
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub expression: Vec<String>,
}

impl EvalArgs {
    /// The expression as a single string
    #[must_use]
    pub fn joined(&self) -> String {
        self.expression.join(" ")
    }
}

/// Evaluation backend choice
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendArg {
    /// Evaluate inside the front-end process
    #[default]
    InProcess,
    /// Evaluate in a spawned `arith serve` process
    Child,
}

/// `--color` value
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Style only on a terminal
    #[default]
    Auto,
    /// Style even when piped
    Always,
    /// Plain text
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
