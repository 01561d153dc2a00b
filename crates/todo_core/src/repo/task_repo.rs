//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own every `Task` for the lifetime of the process.
//! - Assign identifiers and expose CRUD plus status filtering.
//!
//! # Invariants
//! - Ids are unique among stored tasks; a failed create consumes no id.
//! - Listing order is insertion order.
//! - Reads return owned snapshots, never references into storage.
//! - Updates are all-or-nothing: a rejected field leaves the stored task intact.

use crate::model::task::{checked_title, Task, TaskId, TaskStatus, TaskValidationError};
use log::{debug, info, warn};

pub type RepoResult<T> = Result<T, TaskValidationError>;

/// Status filter for listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Complete,
    Incomplete,
}

impl StatusFilter {
    /// Parses `all|complete|incomplete` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "complete" | "completed" => Some(Self::Complete),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }

    /// Returns whether `task` passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Complete => task.is_complete(),
            Self::Incomplete => task.is_incomplete(),
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Repository interface for task CRUD operations.
///
/// Not-found is reported through `Option`/`bool`, never through `Err`.
pub trait TaskRepository {
    fn create_task(&mut self, title: &str, description: Option<&str>) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> Option<Task>;
    fn get_all_tasks(&self) -> Vec<Task>;
    fn get_tasks_by_status(&self, filter: StatusFilter) -> Vec<Task>;
    fn update_task(&mut self, id: TaskId, update: &TaskUpdate) -> RepoResult<Option<Task>>;
    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Option<Task>;
    fn delete_task(&mut self, id: TaskId) -> bool;
    fn get_task_count(&self) -> usize;
}

/// Process-local task store.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    // Insertion order doubles as listing order.
    tasks: Vec<Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    /// Returns the lowest positive id not held by a stored task.
    ///
    /// Ids freed by deletion are handed out again, lowest first.
    fn next_free_id(&self) -> TaskId {
        let mut used: Vec<TaskId> = self.tasks.iter().map(Task::id).collect();
        used.sort_unstable();

        let mut candidate: TaskId = 1;
        for id in used {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        candidate
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create_task(&mut self, title: &str, description: Option<&str>) -> RepoResult<Task> {
        // Title is checked before an id is picked so failures allocate nothing.
        if let Err(err) = checked_title(title) {
            warn!("event=task_create module=repo status=rejected reason={err:?}");
            return Err(err);
        }

        let id = self.next_free_id();
        let task = Task::new(id, title, description).inspect_err(|err| {
            warn!("event=task_create module=repo status=rejected reason={err:?}");
        })?;
        self.tasks.push(task.clone());

        info!(
            "event=task_create module=repo status=ok id={} count={}",
            id,
            self.tasks.len()
        );
        Ok(task)
    }

    fn get_task(&self, id: TaskId) -> Option<Task> {
        self.tasks.iter().find(|task| task.id() == id).cloned()
    }

    fn get_all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    fn get_tasks_by_status(&self, filter: StatusFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    fn update_task(&mut self, id: TaskId, update: &TaskUpdate) -> RepoResult<Option<Task>> {
        let Some(index) = self.position(id) else {
            debug!("event=task_update module=repo status=not_found id={id}");
            return Ok(None);
        };

        let mut staged = self.tasks[index].clone();
        if let Some(title) = update.title.as_deref() {
            staged.update_title(title)?;
        }
        if let Some(description) = update.description.as_deref() {
            staged.update_description(Some(description))?;
        }
        if let Some(status) = update.status {
            staged.set_status(status);
        }
        staged.validate()?;

        self.tasks[index] = staged.clone();
        info!(
            "event=task_update module=repo status=ok id={} title={} description={} task_status={}",
            id,
            update.title.is_some(),
            update.description.is_some(),
            staged.status().as_str()
        );
        Ok(Some(staged))
    }

    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Option<Task> {
        let Some(index) = self.position(id) else {
            debug!("event=task_status module=repo status=not_found id={id}");
            return None;
        };

        let task = &mut self.tasks[index];
        task.set_status(status);
        info!(
            "event=task_status module=repo status=ok id={} task_status={}",
            id,
            status.as_str()
        );
        Some(task.clone())
    }

    fn delete_task(&mut self, id: TaskId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.tasks.remove(index);
                info!(
                    "event=task_delete module=repo status=ok id={} count={}",
                    id,
                    self.tasks.len()
                );
                true
            }
            None => {
                debug!("event=task_delete module=repo status=not_found id={id}");
                false
            }
        }
    }

    fn get_task_count(&self) -> usize {
        self.tasks.len()
    }
}
