//! Task domain model.
//!
//! # Responsibility
//! - Define the single record type managed by the task store.
//! - Own field validation and completion-status transitions.
//!
//! # Invariants
//! - `title` is non-empty after trimming and at most `MAX_TITLE_CHARS` chars.
//! - `description` is at most `MAX_DESCRIPTION_CHARS` chars; never absent.
//! - A failed mutation leaves the task exactly as it was.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum title length, counted in chars before trimming.
pub const MAX_TITLE_CHARS: usize = 1000;
/// Maximum description length, counted in chars.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Store-assigned identifier. Always positive.
pub type TaskId = u32;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Incomplete,
    Complete,
}

impl TaskStatus {
    /// Returns the opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Incomplete => Self::Complete,
            Self::Complete => Self::Incomplete,
        }
    }

    /// Stable lowercase label used by logs and renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
        }
    }
}

/// Field-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Title exceeds `MAX_TITLE_CHARS`.
    TitleTooLong { len: usize },
    /// Description exceeds `MAX_DESCRIPTION_CHARS`.
    DescriptionTooLong { len: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => {
                write!(f, "task title cannot be empty or contain only whitespace")
            }
            Self::TitleTooLong { len } => write!(
                f,
                "task title cannot exceed {MAX_TITLE_CHARS} characters (got {len})"
            ),
            Self::DescriptionTooLong { len } => write!(
                f,
                "task description cannot exceed {MAX_DESCRIPTION_CHARS} characters (got {len})"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// One todo record.
///
/// Fields are private so every instance observed outside this module has
/// passed [`Task::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
}

impl Task {
    /// Builds a validated, incomplete task.
    ///
    /// The title is stored trimmed; a missing description becomes `""`.
    /// Callers outside the store should not pick ids themselves; this
    /// constructor is public so the entity rules can be exercised directly.
    pub fn new(
        id: TaskId,
        title: &str,
        description: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_status(id, title, description, TaskStatus::default())
    }

    /// Same checks as [`Task::new`], starting in `status`.
    pub fn with_status(
        id: TaskId,
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            id,
            title: checked_title(title)?,
            description: checked_description(description)?,
            status,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }

    pub fn is_incomplete(&self) -> bool {
        !self.is_complete()
    }

    /// Replaces the title after running the construction checks.
    ///
    /// On error the current title is kept.
    pub fn update_title(&mut self, new_title: &str) -> Result<(), TaskValidationError> {
        self.title = checked_title(new_title)?;
        Ok(())
    }

    /// Replaces the description; `None` clears it to `""`.
    ///
    /// On error the current description is kept.
    pub fn update_description(
        &mut self,
        new_description: Option<&str>,
    ) -> Result<(), TaskValidationError> {
        self.description = checked_description(new_description)?;
        Ok(())
    }

    /// Flips between complete and incomplete.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Re-checks every field invariant.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        checked_title(&self.title)?;
        checked_description(Some(self.description.as_str()))?;
        Ok(())
    }
}

/// Validates a raw title and returns its stored (trimmed) form.
pub(crate) fn checked_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let len = raw.chars().count();
    if len > MAX_TITLE_CHARS {
        return Err(TaskValidationError::TitleTooLong { len });
    }
    Ok(trimmed.to_string())
}

fn checked_description(raw: Option<&str>) -> Result<String, TaskValidationError> {
    let value = raw.unwrap_or_default();
    let len = value.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        return Err(TaskValidationError::DescriptionTooLong { len });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{checked_title, TaskStatus, TaskValidationError, MAX_TITLE_CHARS};

    #[test]
    fn checked_title_counts_chars_not_bytes() {
        let title = "é".repeat(MAX_TITLE_CHARS);
        assert!(title.len() > MAX_TITLE_CHARS);
        assert_eq!(checked_title(&title).unwrap(), title);
    }

    #[test]
    fn checked_title_measures_length_before_trim() {
        let padded = format!(" {} ", "a".repeat(MAX_TITLE_CHARS - 1));
        let err = checked_title(&padded).unwrap_err();
        assert_eq!(
            err,
            TaskValidationError::TitleTooLong {
                len: MAX_TITLE_CHARS + 1
            }
        );
    }

    #[test]
    fn default_status_is_incomplete_and_toggles() {
        assert_eq!(TaskStatus::default(), TaskStatus::Incomplete);
        assert_eq!(TaskStatus::default().toggled(), TaskStatus::Complete);
        assert_eq!(TaskStatus::Complete.as_str(), "complete");
    }
}
