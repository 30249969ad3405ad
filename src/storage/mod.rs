/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a small interface for saving, loading and deleting habits together with
/// their completion dates.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{DomainError, Habit, HabitId, HabitStats};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Invalid stored data: {0}")]
    InvalidData(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait defining the storage interface for habits
///
/// The store is the source of truth: callers re-load after any write and
/// mutate the freshly loaded habit.
pub trait HabitStorage {
    /// Insert or update a habit and replace its completion set
    ///
    /// A habit without an id is inserted and receives its new id. A habit
    /// with an id has its mutable fields updated (never its creation date).
    /// Either way the stored completions afterwards equal the habit's
    /// completions exactly.
    fn save(&self, habit: &mut Habit) -> Result<HabitId, StorageError>;

    /// Every habit ordered by id, each with its completions
    fn load_all(&self) -> Result<Vec<Habit>, StorageError>;

    /// One habit by id, `None` if it does not exist
    fn get_habit(&self, habit_id: HabitId) -> Result<Option<Habit>, StorageError>;

    /// Delete a habit and its completions
    ///
    /// Unknown ids are ignored. Returns whether a row was removed. The row is
    /// never decoded, so a habit with unreadable stored values can still be
    /// deleted.
    fn delete(&self, habit_id: HabitId) -> Result<bool, StorageError>;

    /// Completion count and rate for one habit, `None` if it does not exist
    fn stats(&self, habit_id: HabitId) -> Result<Option<HabitStats>, StorageError>;
}
