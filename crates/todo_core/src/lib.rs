//! Core domain logic for the todo task manager.
//! All task invariants and id assignment live in this crate.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::task::{
    Task, TaskId, TaskStatus, TaskValidationError, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS,
};
pub use repo::task_repo::{
    InMemoryTaskRepository, RepoResult, StatusFilter, TaskRepository, TaskUpdate,
};
pub use service::task_service::TaskService;
