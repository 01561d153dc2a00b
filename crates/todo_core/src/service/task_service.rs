//! Task use-case service.
//!
//! # Responsibility
//! - Expose intent-level task operations (add, mark, toggle, filter).
//! - Delegate storage and id assignment to a `TaskRepository`.
//!
//! # Invariants
//! - Status is only changed through `mark_*`/`toggle_status`, never through
//!   `update_task`.
//! - Not-found is returned as `None`/`false`; validation errors propagate
//!   unchanged.

use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::task_repo::{RepoResult, StatusFilter, TaskRepository, TaskUpdate};

/// Use-case service wrapper over a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds an incomplete task and returns it with its assigned id.
    pub fn add_task(&mut self, title: &str, description: Option<&str>) -> RepoResult<Task> {
        self.repo.create_task(title, description)
    }

    /// Returns `false` when no task has this id.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.repo.delete_task(id)
    }

    /// Updates title and/or description.
    ///
    /// # Contract
    /// - `None` arguments keep the current value.
    /// - Returns `Ok(None)` when the id does not exist.
    pub fn update_task(
        &mut self,
        id: TaskId,
        title: Option<&str>,
        description: Option<&str>,
    ) -> RepoResult<Option<Task>> {
        let update = TaskUpdate {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            status: None,
        };
        self.repo.update_task(id, &update)
    }

    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.repo.get_all_tasks()
    }

    pub fn get_task_by_id(&self, id: TaskId) -> Option<Task> {
        self.repo.get_task(id)
    }

    /// Marks a task complete. Repeating the call is a no-op success.
    pub fn mark_complete(&mut self, id: TaskId) -> Option<Task> {
        self.repo.set_status(id, TaskStatus::Complete)
    }

    /// Marks a task incomplete. Repeating the call is a no-op success.
    pub fn mark_incomplete(&mut self, id: TaskId) -> Option<Task> {
        self.repo.set_status(id, TaskStatus::Incomplete)
    }

    /// Flips the current completion state.
    pub fn toggle_status(&mut self, id: TaskId) -> Option<Task> {
        let current = self.repo.get_task(id)?;
        self.repo.set_status(id, current.status().toggled())
    }

    pub fn get_completed_tasks(&self) -> Vec<Task> {
        self.repo.get_tasks_by_status(StatusFilter::Complete)
    }

    pub fn get_incomplete_tasks(&self) -> Vec<Task> {
        self.repo.get_tasks_by_status(StatusFilter::Incomplete)
    }

    pub fn get_tasks_by_status(&self, filter: StatusFilter) -> Vec<Task> {
        self.repo.get_tasks_by_status(filter)
    }

    pub fn get_task_count(&self) -> usize {
        self.repo.get_task_count()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskService;
    use crate::repo::task_repo::InMemoryTaskRepository;

    #[test]
    fn toggle_status_on_missing_id_returns_none() {
        let mut service = TaskService::new(InMemoryTaskRepository::new());
        assert!(service.toggle_status(42).is_none());
        assert_eq!(service.get_task_count(), 0);
    }
}
