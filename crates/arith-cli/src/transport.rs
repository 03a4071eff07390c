//! Front-end to backend transport
//!
//! The front end talks to whatever evaluates expressions through the
//! [`Backend`] trait. [`InProcessBackend`] calls the engine directly;
//! [`ChildProcessBackend`] spawns `arith serve` and exchanges JSON lines
//! over its pipes. [`serve`] is the other end of that conversation.

use crate::error::{CliError, CliResult};
use arith_engine::core::outcome::Outcome;
use arith_engine::core::Engine;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Message sent to a backend, one JSON document per line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    /// Evaluate an already substituted expression
    Evaluate(String),
    /// End the session
    Quit,
}

/// Message sent back by a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    /// Result of an `Evaluate` request
    Outcome(Outcome),
    /// Acknowledges `Quit`
    Goodbye,
    /// The request could not be handled; the session is over
    Failure(String),
}

/// Something that can evaluate expressions for the front end
pub trait Backend: std::fmt::Debug {
    /// Evaluates one expression
    fn evaluate(&mut self, expression: &str) -> CliResult<Outcome>;

    /// Ends the session; the backend is unusable afterwards
    fn shutdown(&mut self) -> CliResult<()>;
}

/// Evaluates in the current process
#[derive(Debug, Clone, Default)]
pub struct InProcessBackend {
    engine: Engine,
}

impl InProcessBackend {
    /// Wraps an engine
    #[must_use]
    pub const fn new(engine: Engine) -> Self {
        Self { engine }
    }
}

impl Backend for InProcessBackend {
    fn evaluate(&mut self, expression: &str) -> CliResult<Outcome> {
        Ok(self.engine.process(expression))
    }

    fn shutdown(&mut self) -> CliResult<()> {
        Ok(())
    }
}

/// Evaluates in a child `arith serve` process
#[derive(Debug)]
pub struct ChildProcessBackend {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    reaped: bool,
}

impl ChildProcessBackend {
    /// Spawns `program` with `args` and takes over its standard streams
    pub fn spawn(program: &Path, args: &[String]) -> CliResult<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| CliError::transport(format!("cannot start backend: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CliError::transport("backend stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CliError::transport("backend stdout unavailable"))?;

        tracing::debug!(program = %program.display(), pid = child.id(), "spawned backend");
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            reaped: false,
        })
    }

    /// Spawns this executable in `serve` mode, passing the configuration file along
    pub fn spawn_current(config: Option<&Path>) -> CliResult<Self> {
        let program = std::env::current_exe()?;
        let mut args = Vec::new();
        if let Some(path) = config {
            args.push("--config".to_string());
            args.push(path.display().to_string());
        }
        args.push("serve".to_string());
        Self::spawn(&program, &args)
    }

    fn send(&mut self, request: &Request) -> CliResult<()> {
        let line = serde_json::to_string(request)?;
        writeln!(self.stdin, "{line}")
            .and_then(|()| self.stdin.flush())
            .map_err(|e| CliError::transport(format!("cannot write to backend: {e}")))
    }

    fn receive(&mut self) -> CliResult<Reply> {
        let mut line = String::new();
        let read = self
            .stdout
            .read_line(&mut line)
            .map_err(|e| CliError::transport(format!("cannot read from backend: {e}")))?;
        if read == 0 {
            return Err(CliError::transport("backend closed the connection"));
        }
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

impl Backend for ChildProcessBackend {
    fn evaluate(&mut self, expression: &str) -> CliResult<Outcome> {
        if self.reaped {
            return Err(CliError::transport("backend already shut down"));
        }
        self.send(&Request::Evaluate(expression.to_string()))?;
        match self.receive()? {
            Reply::Outcome(outcome) => Ok(outcome),
            Reply::Failure(message) => Err(CliError::transport(message)),
            Reply::Goodbye => Err(CliError::protocol("backend ended the session")),
        }
    }

    fn shutdown(&mut self) -> CliResult<()> {
        if self.reaped {
            return Ok(());
        }
        let reply = self.send(&Request::Quit).and_then(|()| self.receive());
        if reply.is_err() {
            let _ = self.child.kill();
        }
        let status = self.child.wait()?;
        self.reaped = true;
        tracing::debug!(%status, "backend exited");
        match reply? {
            Reply::Goodbye => Ok(()),
            other => Err(CliError::protocol(format!(
                "expected goodbye, got {other:?}"
            ))),
        }
    }
}

impl Drop for ChildProcessBackend {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Answers requests from `input` on `output` until `Quit` or end of input.
///
/// Blank lines are skipped. A request that does not parse gets one
/// `Failure` reply and ends the session with a protocol error.
pub fn serve<R: BufRead, W: Write>(engine: &Engine, input: R, mut output: W) -> CliResult<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request = match serde_json::from_str::<Request>(&line) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                write_reply(&mut output, &Reply::Failure("malformed request".into()))?;
                return Err(CliError::protocol(format!("malformed request: {e}")));
            }
        };

        match request {
            Request::Evaluate(expression) => {
                let outcome = engine.process(&expression);
                write_reply(&mut output, &Reply::Outcome(outcome))?;
            }
            Request::Quit => {
                write_reply(&mut output, &Reply::Goodbye)?;
                return Ok(());
            }
        }
    }
    tracing::debug!("input closed without quit");
    Ok(())
}

fn write_reply<W: Write>(output: &mut W, reply: &Reply) -> CliResult<()> {
    let line = serde_json::to_string(reply)?;
    writeln!(output, "{line}")?;
    output.flush()?;
    Ok(())
}
