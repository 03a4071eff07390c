//! arith: error-tolerant calculator
//!
//! ## Usage
//!
//! ```bash
//! arith repl                    # Interactive session
//! arith repl --backend child    # Evaluate in a separate process
//! arith eval "2(3 + 4)"         # One-shot evaluation
//! arith eval --json "1/0"       # Outcome as JSON
//! arith serve                   # JSON-lines backend on stdin/stdout
//! ```

use arith_cli::{
    render_outcome, serve, Backend, BackendArg, ChildProcessBackend, Cli, CliConfig, CliError,
    CliResult, Commands, EvalArgs, InProcessBackend, LineEditor, PipedInput, Repl, ReplArgs,
    Reporter, Verbosity,
};
use arith_engine::core::history::History;
use arith_engine::core::memory::Memory;
use arith_engine::core::Engine;
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Layers flags over the configuration file over defaults
fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    if cli.quiet && cli.verbose > 0 {
        return Err(CliError::invalid_argument("--quiet cannot be combined with --verbose"));
    }

    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    if cli.quiet {
        config.verbosity = Verbosity::Quiet;
    } else if cli.verbose > 0 {
        config.verbosity = Verbosity::from_count(cli.verbose);
    }
    if let Some(color) = cli.color {
        config.color = color.into();
    }
    Ok(config)
}

fn run(cli: &Cli, config: &CliConfig) -> CliResult<ExitCode> {
    match &cli.command {
        Commands::Repl(args) => run_repl(cli, config, args),
        Commands::Eval(args) => run_eval(config, args),
        Commands::Serve => run_serve(config),
    }
}

fn run_repl(cli: &Cli, config: &CliConfig, args: &ReplArgs) -> CliResult<ExitCode> {
    let backend: Box<dyn Backend> = match args.backend {
        BackendArg::InProcess => Box::new(InProcessBackend::new(Engine::with_config(
            config.engine.clone(),
        )?)),
        BackendArg::Child => Box::new(ChildProcessBackend::spawn_current(cli.config.as_deref())?),
    };
    tracing::debug!(backend = ?args.backend, "starting repl");

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let mut repl = Repl::new(
        backend,
        Memory::with_token(config.engine.memory_token.clone()),
        History::with_capacity(config.history_size),
    );
    let stdin = std::io::stdin();
    let code = if stdin.is_terminal() {
        repl.run(&mut LineEditor::new()?, &reporter)
    } else {
        repl.run(&mut PipedInput::new(stdin.lock()), &reporter)
    };
    Ok(code)
}

fn run_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<ExitCode> {
    let expression = args.joined();
    if expression.trim().is_empty() {
        return Err(CliError::invalid_argument("expression must not be blank"));
    }
    let engine = Engine::with_config(config.engine.clone())?;
    let memory = Memory::with_token(config.engine.memory_token.clone());
    let outcome = engine.process(&memory.substitute(&expression));

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome, config.color.should_color()));
    }

    Ok(if outcome.is_evaluated() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_serve(config: &CliConfig) -> CliResult<ExitCode> {
    let engine = Engine::with_config(config.engine.clone())?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&engine, stdin.lock(), stdout.lock())?;
    Ok(ExitCode::SUCCESS)
}
