//! One-shot command execution.
//!
//! # Responsibility
//! - Run a parsed `Command` against the task service.
//! - Render success, not-found and validation outcomes as messages.
//!
//! # Invariants
//! - Not-found and validation failures yield `Outcome::Failed`, never `Err`.
//! - `Err` is reserved for broken output streams.

use crate::args::{Command, USAGE};
use crate::error::CliError;
use crate::render::task_table;
use std::io::Write;
use todo_core::{StatusFilter, Task, TaskId, TaskRepository, TaskService};

/// Result of a command as seen by the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Executes a non-interactive command.
///
/// `Command::Interactive` is handled by the caller.
pub fn run_command<R, W, E>(
    service: &mut TaskService<R>,
    command: Command,
    out: &mut W,
    err: &mut E,
) -> Result<Outcome, CliError>
where
    R: TaskRepository,
    W: Write,
    E: Write,
{
    match command {
        Command::Add { title, description } => {
            match service.add_task(&title, description.as_deref()) {
                Ok(task) => {
                    writeln!(out, "Task added successfully with ID: {}", task.id())?;
                    Ok(Outcome::Succeeded)
                }
                Err(validation) => {
                    writeln!(err, "Error: {validation}")?;
                    Ok(Outcome::Failed)
                }
            }
        }
        Command::List { status, json } => {
            let tasks = service.get_tasks_by_status(status);
            if json {
                serde_json::to_writer_pretty(&mut *out, &tasks)?;
                writeln!(out)?;
            } else if tasks.is_empty() {
                writeln!(out, "No tasks found.")?;
            } else {
                if status == StatusFilter::All {
                    writeln!(out, "Total tasks: {}", tasks.len())?;
                }
                write!(out, "{}", task_table(&tasks))?;
            }
            Ok(Outcome::Succeeded)
        }
        Command::Complete(id) => {
            let task = service.mark_complete(id);
            report_status(out, id, task)
        }
        Command::Incomplete(id) => {
            let task = service.mark_incomplete(id);
            report_status(out, id, task)
        }
        Command::Toggle(id) => {
            let task = service.toggle_status(id);
            report_status(out, id, task)
        }
        Command::Delete(id) => {
            if service.delete_task(id) {
                writeln!(out, "Task {id} deleted successfully")?;
                Ok(Outcome::Succeeded)
            } else {
                not_found(out, id)
            }
        }
        Command::Update {
            id,
            title,
            description,
        } => match service.update_task(id, title.as_deref(), description.as_deref()) {
            Ok(Some(_)) => {
                writeln!(out, "Task {id} updated successfully")?;
                Ok(Outcome::Succeeded)
            }
            Ok(None) => not_found(out, id),
            Err(validation) => {
                writeln!(err, "Error: {validation}")?;
                Ok(Outcome::Failed)
            }
        },
        Command::Help | Command::Interactive => {
            write!(out, "{USAGE}")?;
            Ok(Outcome::Succeeded)
        }
    }
}

fn report_status<W: Write>(
    out: &mut W,
    id: TaskId,
    task: Option<Task>,
) -> Result<Outcome, CliError> {
    match task {
        Some(task) => {
            writeln!(out, "Task {id} marked as {}", task.status().as_str())?;
            Ok(Outcome::Succeeded)
        }
        None => not_found(out, id),
    }
}

fn not_found<W: Write>(out: &mut W, id: TaskId) -> Result<Outcome, CliError> {
    writeln!(out, "Task with ID {id} not found")?;
    Ok(Outcome::Failed)
}

#[cfg(test)]
mod tests {
    use super::{run_command, Outcome};
    use crate::args::Command;
    use todo_core::{InMemoryTaskRepository, StatusFilter, TaskService};

    struct Run {
        outcome: Outcome,
        stdout: String,
        stderr: String,
    }

    fn run(service: &mut TaskService<InMemoryTaskRepository>, command: Command) -> Run {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let outcome = run_command(service, command, &mut stdout, &mut stderr).unwrap();
        Run {
            outcome,
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    fn add(title: &str) -> Command {
        Command::Add {
            title: title.to_string(),
            description: None,
        }
    }

    #[test]
    fn add_reports_assigned_id() {
        let mut service = TaskService::new(InMemoryTaskRepository::new());
        let result = run(&mut service, add("Buy groceries"));
        assert_eq!(result.outcome, Outcome::Succeeded);
        assert_eq!(result.stdout, "Task added successfully with ID: 1\n");
    }

    #[test]
    fn add_with_blank_title_fails_on_stderr() {
        let mut service = TaskService::new(InMemoryTaskRepository::new());
        let result = run(&mut service, add("   "));
        assert_eq!(result.outcome, Outcome::Failed);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.starts_with("Error: task title cannot be empty"));
        assert_eq!(service.get_task_count(), 0);
    }

    #[test]
    fn status_commands_report_new_state_or_not_found() {
        let mut service = TaskService::new(InMemoryTaskRepository::new());
        run(&mut service, add("Task"));

        let done = run(&mut service, Command::Complete(1));
        assert_eq!(done.stdout, "Task 1 marked as complete\n");
        let flipped = run(&mut service, Command::Toggle(1));
        assert_eq!(flipped.stdout, "Task 1 marked as incomplete\n");

        let missing = run(&mut service, Command::Incomplete(9));
        assert_eq!(missing.outcome, Outcome::Failed);
        assert_eq!(missing.stdout, "Task with ID 9 not found\n");
    }

    #[test]
    fn list_renders_empty_table_and_json() {
        let mut service = TaskService::new(InMemoryTaskRepository::new());
        let empty = run(
            &mut service,
            Command::List {
                status: StatusFilter::All,
                json: false,
            },
        );
        assert_eq!(empty.stdout, "No tasks found.\n");

        run(&mut service, add("Buy groceries"));
        let json = run(
            &mut service,
            Command::List {
                status: StatusFilter::Incomplete,
                json: true,
            },
        );
        let value: serde_json::Value = serde_json::from_str(&json.stdout).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["status"], "incomplete");
    }

    #[test]
    fn update_and_delete_report_outcomes() {
        let mut service = TaskService::new(InMemoryTaskRepository::new());
        run(&mut service, add("Draft"));

        let updated = run(
            &mut service,
            Command::Update {
                id: 1,
                title: Some("Final".to_string()),
                description: None,
            },
        );
        assert_eq!(updated.stdout, "Task 1 updated successfully\n");

        let deleted = run(&mut service, Command::Delete(1));
        assert_eq!(deleted.stdout, "Task 1 deleted successfully\n");
        let again = run(&mut service, Command::Delete(1));
        assert_eq!(again.outcome, Outcome::Failed);
    }
}
