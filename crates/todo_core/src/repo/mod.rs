//! Repository layer abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the task store contract used by the service layer.
//! - Keep id assignment and storage layout out of service code.
//!
//! # Invariants
//! - Repository writes validate through the `Task` entity before committing.
//! - Missing ids are a normal outcome (`None`/`false`), not an error.

pub mod task_repo;
