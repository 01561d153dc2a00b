//! Interactive menu loop.
//!
//! # Responsibility
//! - Prompt/read/print cycle over the task service for one session.
//! - Confirm status changes before applying them.
//!
//! # Invariants
//! - End of input ends the session like `exit`.
//! - Validation errors are printed and the loop continues.

use crate::args::parse_task_id;
use crate::render::{status_label, task_table};
use log::debug;
use std::io::{self, BufRead, Write};
use todo_core::{TaskId, TaskRepository, TaskService};

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Mark,
    Help,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "add" | "a" => Some(Self::Add),
            "2" | "view" | "list" | "v" => Some(Self::View),
            "3" | "update" | "u" => Some(Self::Update),
            "4" | "delete" | "d" => Some(Self::Delete),
            "5" | "complete" | "mark" | "c" => Some(Self::Mark),
            "6" | "help" | "h" => Some(Self::Help),
            "7" | "exit" | "quit" | "q" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the menu until the user exits or input ends.
pub fn run_interactive<R, I, W>(
    service: &mut TaskService<R>,
    input: &mut I,
    out: &mut W,
) -> io::Result<()>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    let mut session = Session {
        service,
        input,
        out,
    };
    session.run()
}

struct Session<'a, R: TaskRepository, I, W> {
    service: &'a mut TaskService<R>,
    input: &'a mut I,
    out: &'a mut W,
}

impl<R, I, W> Session<'_, R, I, W>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Welcome to the Todo app!")?;
        writeln!(self.out, "Type 'help' for available commands or 'exit' to quit.")?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("\nEnter your choice: ")? else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(
                    self.out,
                    "Invalid choice. Please enter a number between 1-7 or a command name."
                )?;
                continue;
            };
            debug!("event=menu_choice module=cli choice={choice:?}");

            let keep_going = match choice {
                MenuChoice::Add => self.add()?,
                MenuChoice::View => self.view()?,
                MenuChoice::Update => self.update()?,
                MenuChoice::Delete => self.delete()?,
                MenuChoice::Mark => self.mark()?,
                MenuChoice::Help => {
                    self.print_help()?;
                    true
                }
                MenuChoice::Exit => false,
            };
            if !keep_going {
                break;
            }
        }

        writeln!(self.out, "Thank you for using the Todo app. Goodbye!")?;
        self.out.flush()
    }

    /// Prints `message` and reads one trimmed line; `None` on end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a task id: `None` on end of input, `Some(None)` for a non-number.
    fn prompt_id(&mut self, message: &str) -> io::Result<Option<Option<TaskId>>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match parse_task_id(&raw) {
            Some(id) => Ok(Some(Some(id))),
            None => {
                writeln!(self.out, "Invalid task ID. Please enter a number.")?;
                Ok(Some(None))
            }
        }
    }

    fn add(&mut self) -> io::Result<bool> {
        let Some(title) = self.prompt("Enter task title: ")? else {
            return Ok(false);
        };
        if title.is_empty() {
            writeln!(self.out, "Task title cannot be empty.")?;
            return Ok(true);
        }
        let Some(description) = self.prompt("Enter task description (optional): ")? else {
            return Ok(false);
        };

        match self.service.add_task(&title, Some(description.as_str())) {
            Ok(task) => writeln!(self.out, "Task added successfully with ID: {}", task.id())?,
            Err(err) => writeln!(self.out, "Error: {err}")?,
        }
        Ok(true)
    }

    fn view(&mut self) -> io::Result<bool> {
        let tasks = self.service.get_all_tasks();
        if tasks.is_empty() {
            writeln!(self.out, "No tasks found.")?;
        } else {
            writeln!(self.out, "\nTotal tasks: {}", tasks.len())?;
            write!(self.out, "{}", task_table(&tasks))?;
        }
        Ok(true)
    }

    fn update(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_id("Enter task ID to update: ")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };
        let Some(current) = self.service.get_task_by_id(id) else {
            writeln!(self.out, "Task with ID {id} not found")?;
            return Ok(true);
        };

        writeln!(self.out, "Current task: {}", current.title())?;
        if !current.description().is_empty() {
            writeln!(self.out, "Current description: {}", current.description())?;
        }
        writeln!(self.out, "Current status: {}", status_label(current.status()))?;

        let Some(title) = self.prompt(&format!(
            "Enter new title (or press Enter to keep '{}'): ",
            current.title()
        ))?
        else {
            return Ok(false);
        };
        let Some(description) =
            self.prompt("Enter new description (or press Enter to keep current): ")?
        else {
            return Ok(false);
        };

        let title = Some(title).filter(|value| !value.is_empty());
        let description = Some(description).filter(|value| !value.is_empty());
        match self
            .service
            .update_task(id, title.as_deref(), description.as_deref())
        {
            Ok(Some(_)) => writeln!(self.out, "Task {id} updated successfully")?,
            Ok(None) => writeln!(self.out, "Task with ID {id} not found")?,
            Err(err) => writeln!(self.out, "Error: {err}")?,
        }
        Ok(true)
    }

    fn delete(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_id("Enter task ID to delete: ")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };
        if self.service.delete_task(id) {
            writeln!(self.out, "Task {id} deleted successfully")?;
        } else {
            writeln!(self.out, "Task with ID {id} not found")?;
        }
        Ok(true)
    }

    fn mark(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_id("Enter task ID to mark: ")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };
        let Some(task) = self.service.get_task_by_id(id) else {
            writeln!(self.out, "Task with ID {id} not found")?;
            return Ok(true);
        };

        writeln!(
            self.out,
            "Current status for task '{}': {}",
            task.title(),
            status_label(task.status())
        )?;
        let target = task.status().toggled();
        let Some(answer) =
            self.prompt(&format!("Mark task as {}? (y/N): ", target.as_str()))?
        else {
            return Ok(false);
        };
        if !matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            writeln!(self.out, "Operation cancelled.")?;
            return Ok(true);
        }

        let updated = if task.is_complete() {
            self.service.mark_incomplete(id)
        } else {
            self.service.mark_complete(id)
        };
        match updated {
            Some(task) => writeln!(self.out, "Task {id} marked as {}", task.status().as_str())?,
            None => writeln!(self.out, "Failed to update task {id}")?,
        }
        Ok(true)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{rule}\nTODO APP - MAIN MENU\n{rule}")?;
        for line in [
            "1. Add Task",
            "2. View Tasks",
            "3. Update Task",
            "4. Delete Task",
            "5. Mark Complete/Incomplete",
            "6. Help",
            "7. Exit",
        ] {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "{rule}")
    }

    fn print_help(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{rule}\nHELP - Todo App Commands\n{rule}")?;
        for line in [
            "1. Add Task: Create a new task with title and optional description",
            "2. View Tasks: Display all tasks with status indicators",
            "3. Update Task: Modify an existing task's title or description",
            "4. Delete Task: Remove a task from the list",
            "5. Mark Complete/Incomplete: Change a task's completion status",
            "6. Help: Display this help information",
            "7. Exit: Quit the application",
            "",
            "Tasks live in memory only and are discarded when the session ends.",
            "Run `todo help` for the one-shot command-line usage.",
        ] {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "{rule}")
    }
}
