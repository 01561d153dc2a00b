//! Plain-text rendering of task lists.

use todo_core::{Task, TaskStatus};

const TITLE_WIDTH: usize = 20;
const TITLE_KEEP: usize = 17;
const DESCRIPTION_WIDTH: usize = 30;

/// Human label for a status.
pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Complete => "Complete",
        TaskStatus::Incomplete => "Incomplete",
    }
}

/// Renders tasks as an `ID | Title | Status | Description` table.
///
/// Long titles and descriptions are shortened with a trailing `...`.
pub fn task_table(tasks: &[Task]) -> String {
    let mut out = format!(
        "{:<4} | {:<20} | {:<12} | {}\n{}\n",
        "ID",
        "Title",
        "Status",
        "Description",
        "-".repeat(60)
    );
    for task in tasks {
        out.push_str(&format!(
            "{:<4} | {:<20} | {:<12} | {}\n",
            task.id(),
            shorten(task.title(), TITLE_WIDTH, TITLE_KEEP),
            status_label(task.status()),
            shorten(task.description(), DESCRIPTION_WIDTH, DESCRIPTION_WIDTH)
        ));
    }
    out
}

/// Keeps `keep` chars plus `...` when `value` is longer than `width` chars.
fn shorten(value: &str, width: usize, keep: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut short: String = value.chars().take(keep).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::{shorten, task_table};
    use todo_core::{Task, TaskStatus};

    #[test]
    fn shorten_respects_width_and_keep() {
        assert_eq!(shorten("exactly twenty chars", 20, 17), "exactly twenty chars");
        assert_eq!(shorten("twenty-one characters", 20, 17), "twenty-one charac...");
    }

    #[test]
    fn task_table_lists_rows_with_status_labels() {
        let done = Task::with_status(2, "Write report", None, TaskStatus::Complete).unwrap();
        let tasks = vec![
            Task::new(1, "Buy groceries", Some("Milk, bread, eggs")).unwrap(),
            done,
        ];

        let table = task_table(&tasks);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID   | Title"));
        assert!(lines[2].contains("Buy groceries") && lines[2].contains("Incomplete"));
        assert!(lines[3].contains("Write report") && lines[3].contains("Complete"));
    }
}
