/// Habit entity and related functionality
///
/// This module defines the core Habit struct: a habit's fields, its set of
/// completion dates, and the metrics derived from them (completion rate and
/// current streak).

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use crate::domain::{today, DomainError, HabitId, HabitStatus};

/// Default goal for a new habit
pub const DEFAULT_TARGET_DAYS: u32 = 7;

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;

/// A habit represents something the user wants to do regularly
///
/// The completion history is a set of calendar dates, so a habit can be
/// completed at most once per day.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    /// Store-assigned identifier, `None` until the first save
    pub id: Option<HabitId>,
    /// Display name (e.g., "Read", "Morning Run")
    pub name: String,
    /// Free-text description, empty when not given
    pub description: String,
    /// Number of completions that counts as reaching the goal
    pub target_days: u32,
    /// Day the habit was created; never changes afterwards
    creation_date: NaiveDate,
    /// Informational lifecycle status
    pub status: HabitStatus,
    /// Days on which the habit was done
    completions: BTreeSet<NaiveDate>,
}

impl Habit {
    /// Create a new habit with the default target and today's creation date
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id: None,
            name,
            description: String::new(),
            target_days: DEFAULT_TARGET_DAYS,
            creation_date: today(),
            status: HabitStatus::Active,
            completions: BTreeSet::new(),
        })
    }

    /// Set the description, validating its length
    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self, DomainError> {
        let description = description.into();
        Self::validate_description(&description)?;
        self.description = description;
        Ok(self)
    }

    /// Set the completion target
    pub fn with_target_days(mut self, target_days: u32) -> Self {
        self.target_days = target_days;
        self
    }

    /// Create a habit from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when hydrating rows.
    pub fn from_existing(
        id: Option<HabitId>,
        name: String,
        description: String,
        target_days: u32,
        creation_date: NaiveDate,
        status: HabitStatus,
        completions: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            target_days,
            creation_date,
            status,
            completions: completions.into_iter().collect(),
        }
    }

    /// Apply a partial update, validating every provided field first
    ///
    /// Nothing is changed if any field fails validation.
    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        target_days: Option<u32>,
        status: Option<HabitStatus>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_name) = name {
            Self::validate_name(new_name)?;
        }
        if let Some(ref new_description) = description {
            Self::validate_description(new_description)?;
        }
        if let Some(target) = target_days {
            Self::validate_target(target)?;
        }

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(target) = target_days {
            self.target_days = target;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }

        Ok(())
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    /// Completion dates in ascending order
    pub fn completions(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.completions.iter().copied()
    }

    pub fn completion_count(&self) -> usize {
        self.completions.len()
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }

    /// Record a completion for `date`
    ///
    /// Returns `false` without changing anything when the date is already
    /// recorded.
    pub fn mark_completed(&mut self, date: NaiveDate) -> bool {
        self.completions.insert(date)
    }

    /// Record a completion for today
    pub fn mark_completed_today(&mut self) -> bool {
        self.mark_completed(today())
    }

    /// Drop the completion for `date`; returns whether it was present
    pub fn remove_completion(&mut self, date: NaiveDate) -> bool {
        self.completions.remove(&date)
    }

    /// Progress towards the target, capped at 1.0
    pub fn completion_rate(&self) -> f64 {
        completion_rate(self.completions.len() as u64, self.target_days)
    }

    /// Consecutive completed days ending today
    pub fn streak(&self) -> u32 {
        self.streak_as_of(today())
    }

    /// Consecutive completed days ending on `day`
    ///
    /// The run must include `day` itself: a habit done yesterday and the day
    /// before but not on `day` has a streak of 0.
    pub fn streak_as_of(&self, day: NaiveDate) -> u32 {
        let mut streak = 0;
        // Completions after `day` do not break the run
        while self.completions.contains(&(day - Duration::days(streak as i64))) {
            streak += 1;
        }
        streak
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidHabitName(format!(
                "Habit name cannot be longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation {
                message: format!(
                    "Description cannot be longer than {} characters",
                    MAX_DESCRIPTION_LEN
                ),
            });
        }
        Ok(())
    }

    /// A target of zero is representable but never accepted as user input
    pub fn validate_target(target_days: u32) -> Result<(), DomainError> {
        if target_days == 0 {
            return Err(DomainError::InvalidTarget(
                "Target must be at least 1 day".to_string()
            ));
        }
        Ok(())
    }
}

/// `count / target` capped at 1.0, and 0.0 for a zero target
pub fn completion_rate(count: u64, target_days: u32) -> f64 {
    if target_days == 0 {
        return 0.0;
    }
    (count as f64 / target_days as f64).min(1.0)
}
