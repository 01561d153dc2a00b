//! `todo` command-line entry point.
//!
//! # Responsibility
//! - Resolve logging config from flags and environment.
//! - Wire the in-memory task store into one-shot or interactive mode.
//!
//! # Invariants
//! - Logging init failure is reported but never blocks the command.
//! - Exit code: 0 success, 1 not-found/validation failure, 2 usage error.

mod args;
mod commands;
mod error;
mod interactive;
mod render;

use args::{parse_args, utf8_args, CliArgs, Command, USAGE};
use commands::{run_command, Outcome};
use error::CliError;
use log::info;
use std::io;
use std::process::ExitCode;
use todo_core::{default_log_level, init_logging, InMemoryTaskRepository, TaskService};

const LOG_LEVEL_ENV: &str = "TODO_LOG_LEVEL";
const LOG_DIR_ENV: &str = "TODO_LOG_DIR";

fn main() -> ExitCode {
    let cli = match utf8_args(std::env::args_os().skip(1)).and_then(parse_args) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    setup_logging(&cli);

    match run(cli.command) {
        Ok(Outcome::Succeeded) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(if matches!(err, CliError::Usage(_)) { 2 } else { 1 })
        }
    }
}

fn run(command: Command) -> Result<Outcome, CliError> {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    info!(
        "event=cli_start module=cli status=ok command={}",
        command.name()
    );

    if command == Command::Interactive {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout().lock();
        interactive::run_interactive(&mut service, &mut input, &mut out)?;
        return Ok(Outcome::Succeeded);
    }

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    run_command(&mut service, command, &mut out, &mut err)
}

/// Flags win over environment; without a log directory logging stays off.
fn setup_logging(cli: &CliArgs) {
    let Some(log_dir) = cli
        .log_dir
        .clone()
        .or_else(|| std::env::var(LOG_DIR_ENV).ok())
        .filter(|dir| !dir.trim().is_empty())
    else {
        return;
    };
    let level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .unwrap_or_else(|| default_log_level().to_string());

    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}
