//! arith CLI library
//!
//! Front end for the arith expression engine: argument parsing, YAML
//! configuration, console output, the interactive session, and the
//! JSON-lines transport to an out-of-process backend.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod input;
mod output;
pub mod repl;
pub mod transport;

pub use commands::{BackendArg, Cli, ColorArg, Commands, EvalArgs, ReplArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use input::{LineEditor, LineSource, PipedInput};
pub use output::{render_outcome, Reporter, GENERIC_FAILURE, PROMPT};
pub use repl::{Repl, Step};
pub use transport::{serve, Backend, ChildProcessBackend, InProcessBackend, Reply, Request};
