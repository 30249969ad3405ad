/// Core types and enums used throughout the domain layer
///
/// This module defines the habit identifier and the habit status enum
/// that are shared by Habit, HabitRecord and the storage layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// The value is assigned by the store on first insert; an in-memory habit
/// that has never been saved has no id at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Raw integer value (the database row id)
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HabitId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Lifecycle status of a habit
///
/// Purely informational: nothing in the core enforces transitions between
/// these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    /// Being worked on
    #[default]
    Active,
    /// Goal reached
    Completed,
    /// Kept for history, no longer tracked
    Archived,
}

impl HabitStatus {
    /// String form used in the database and in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::Active => "active",
            HabitStatus::Completed => "completed",
            HabitStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(HabitStatus::Active),
            "completed" => Ok(HabitStatus::Completed),
            "archived" => Ok(HabitStatus::Archived),
            other => Err(DomainError::InvalidStatus(format!(
                "'{}' is not one of: active, completed, archived",
                other
            ))),
        }
    }
}
