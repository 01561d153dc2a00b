//! Command-line argument parsing.
//!
//! # Responsibility
//! - Turn raw process arguments into a typed `Command`.
//! - Collect logging overrides (`--log-level`, `--log-dir`).
//!
//! # Invariants
//! - Parsing never touches the task service.
//! - Unknown flags and malformed ids are usage errors, never silently ignored.

use crate::error::CliError;
use std::ffi::OsString;
use todo_core::{StatusFilter, TaskId};

pub const USAGE: &str = "\
Usage: todo [--log-level LEVEL] [--log-dir DIR] [COMMAND]

Commands:
  add <title> [description]                      Add a new task
  list [--status all|complete|incomplete] [--json]
                                                 List tasks
  complete <id>                                  Mark a task as complete
  incomplete <id>                                Mark a task as incomplete
  toggle <id>                                    Flip a task's status
  delete <id>                                    Delete a task
  update <id> [--title T] [--description D]      Update a task
  help                                           Show this help

Run without a command to start the interactive menu.

Environment:
  TODO_LOG_LEVEL   log level when --log-level is not given
  TODO_LOG_DIR     absolute log directory when --log-dir is not given

Examples:
  todo add \"Buy groceries\" \"Milk, bread, eggs\"
  todo list --status incomplete
  todo complete 1
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        title: String,
        description: Option<String>,
    },
    List {
        status: StatusFilter,
        json: bool,
    },
    Complete(TaskId),
    Incomplete(TaskId),
    Toggle(TaskId),
    Delete(TaskId),
    Update {
        id: TaskId,
        title: Option<String>,
        description: Option<String>,
    },
    Help,
    Interactive,
}

impl Command {
    /// Stable name for log events; never includes task text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Complete(_) => "complete",
            Self::Incomplete(_) => "incomplete",
            Self::Toggle(_) => "toggle",
            Self::Delete(_) => "delete",
            Self::Update { .. } => "update",
            Self::Help => "help",
            Self::Interactive => "interactive",
        }
    }
}

/// Parsed process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    pub command: Command,
}

/// Converts raw OS arguments, rejecting any that are not valid UTF-8.
pub fn utf8_args<I>(args: I) -> Result<Vec<String>, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                CliError::Usage(format!("argument {raw:?} is not valid UTF-8"))
            })
        })
        .collect()
}

/// Parses arguments without the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let mut log_level = None;
    let mut log_dir = None;

    while let Some(flag) = args.next_if(|arg| arg.starts_with("--log-")) {
        match flag.as_str() {
            "--log-level" => log_level = Some(flag_value(&mut args, "--log-level")?),
            "--log-dir" => log_dir = Some(flag_value(&mut args, "--log-dir")?),
            other => return Err(CliError::Usage(format!("unknown option `{other}`"))),
        }
    }

    let command = match args.next() {
        None => Command::Interactive,
        Some(name) => parse_command(&name, args.collect())?,
    };

    Ok(CliArgs {
        log_level,
        log_dir,
        command,
    })
}

fn parse_command(name: &str, rest: Vec<String>) -> Result<Command, CliError> {
    let mut rest = rest.into_iter();
    let command = match name {
        "add" => {
            let title = rest
                .next()
                .ok_or_else(|| CliError::Usage("add requires a <title>".to_string()))?;
            Command::Add {
                title,
                description: rest.next(),
            }
        }
        "list" => {
            let mut status = StatusFilter::All;
            let mut json = false;
            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "--status" => {
                        let value = flag_value(&mut rest, "--status")?;
                        status = StatusFilter::parse(&value).ok_or_else(|| {
                            CliError::Usage(format!(
                                "invalid --status `{value}`; expected all|complete|incomplete"
                            ))
                        })?;
                    }
                    "--json" => json = true,
                    other => {
                        return Err(CliError::Usage(format!("unexpected argument `{other}`")))
                    }
                }
            }
            Command::List { status, json }
        }
        "complete" => Command::Complete(required_id(&mut rest, name)?),
        "incomplete" => Command::Incomplete(required_id(&mut rest, name)?),
        "toggle" => Command::Toggle(required_id(&mut rest, name)?),
        "delete" => Command::Delete(required_id(&mut rest, name)?),
        "update" => {
            let id = required_id(&mut rest, name)?;
            let mut title = None;
            let mut description = None;
            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "--title" => title = Some(flag_value(&mut rest, "--title")?),
                    "--description" => {
                        description = Some(flag_value(&mut rest, "--description")?)
                    }
                    other => {
                        return Err(CliError::Usage(format!("unexpected argument `{other}`")))
                    }
                }
            }
            Command::Update {
                id,
                title,
                description,
            }
        }
        "help" | "-h" | "--help" => Command::Help,
        other => return Err(CliError::Usage(format!("unknown command `{other}`"))),
    };

    // `list` and `update` consume everything above; the rest take a fixed count.
    if let Some(extra) = rest.next() {
        return Err(CliError::Usage(format!("unexpected argument `{extra}`")));
    }
    Ok(command)
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
}

fn required_id(
    args: &mut impl Iterator<Item = String>,
    command: &str,
) -> Result<TaskId, CliError> {
    let raw = args
        .next()
        .ok_or_else(|| CliError::Usage(format!("{command} requires an <id>")))?;
    parse_task_id(&raw)
        .ok_or_else(|| CliError::Usage(format!("invalid task id `{raw}`; expected a number")))
}

/// Parses a task id typed by the user; `0` is rejected since ids start at 1.
pub fn parse_task_id(raw: &str) -> Option<TaskId> {
    raw.trim().parse::<TaskId>().ok().filter(|id| *id > 0)
}
