/// Tools for listing and fetching habits
///
/// This module implements the habit_list and habit_get tools.

use serde::{Deserialize, Serialize};
use crate::analytics::{AnalyticsEngine, HabitSummary};
use crate::domain::{HabitId, HabitRecord, HabitStatus};
use crate::storage::HabitStorage;
use crate::tools::{require_habit, ToolError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize)]
pub struct ListHabitsParams {
    /// Shorthand for `status: "active"`
    #[serde(default)]
    pub active_only: Option<bool>,
    /// Only habits with this status
    #[serde(default)]
    pub status: Option<String>,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitRecord>,
    /// Totals over the whole collection, not just the filtered part
    pub summary: HabitSummary,
}

/// List habits using the provided storage, ordered by id
pub fn list_habits<S: HabitStorage>(
    storage: &S,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ToolError> {
    let status_filter = match (params.status, params.active_only) {
        (Some(s), _) => Some(s.parse::<HabitStatus>()?),
        (None, Some(true)) => Some(HabitStatus::Active),
        (None, _) => None,
    };

    let habits = storage.load_all()?;
    let summary = AnalyticsEngine::new().summarize(&habits);

    let records = habits
        .iter()
        .filter(|h| status_filter.map_or(true, |status| h.status == status))
        .map(|h| h.to_record())
        .collect();

    Ok(ListHabitsResponse {
        habits: records,
        summary,
    })
}

/// Parameters for fetching one habit
#[derive(Debug, Deserialize)]
pub struct GetHabitParams {
    pub habit_id: HabitId,
}

/// Fetch one habit as a record
pub fn get_habit<S: HabitStorage>(
    storage: &S,
    params: GetHabitParams,
) -> Result<HabitRecord, ToolError> {
    let habit = require_habit(storage, params.habit_id)?;
    Ok(habit.to_record())
}
