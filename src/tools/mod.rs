/// Tools for habit management
///
/// This module contains the operations external clients can call to
/// interact with the habit tracker. Each tool takes a storage and a
/// parameter struct and returns a serializable response.

pub mod completions;
pub mod create;
pub mod delete;
pub mod list;
pub mod log;
pub mod status;
pub mod update;

// Re-export tool functions for easy access
pub use completions::*;
pub use create::*;
pub use delete::*;
pub use list::*;
pub use log::*;
pub use status::*;
pub use update::*;

use thiserror::Error;
use crate::domain::{DomainError, Habit, HabitId};
use crate::storage::{HabitStorage, StorageError};

/// Errors returned by tools
///
/// The variants keep "no such habit", "bad input" and "storage broke"
/// apart so the caller can report each one differently.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Habit {habit_id} has no completion on {date}")]
    CompletionNotFound { habit_id: HabitId, date: String },

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Load a habit that must exist
pub(crate) fn require_habit<S: HabitStorage>(storage: &S, habit_id: HabitId) -> Result<Habit, ToolError> {
    storage
        .get_habit(habit_id)?
        .ok_or(ToolError::HabitNotFound { habit_id })
}

/// Pluralize "day" for messages
pub(crate) fn days(n: u32) -> &'static str {
    if n == 1 { "day" } else { "days" }
}
