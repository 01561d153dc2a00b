//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record used by the store and service layers.
//!
//! # Invariants
//! - A `Task` value is always valid; invalid input is rejected with
//!   `TaskValidationError` before any field changes.

pub mod task;
