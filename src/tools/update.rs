/// Tool for updating existing habits
///
/// This module implements the habit_update tool to modify an existing
/// habit's name, description, target or status.

use serde::{Deserialize, Serialize};
use crate::domain::{HabitId, HabitRecord, HabitStatus};
use crate::storage::HabitStorage;
use crate::tools::{require_habit, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize)]
pub struct UpdateHabitParams {
    pub habit_id: HabitId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_days: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub habit: HabitRecord,
    pub message: String,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: HabitStorage>(
    storage: &S,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<HabitStatus>)
        .transpose()?;

    let mut habit = require_habit(storage, params.habit_id)?;
    habit.update(
        params.name.map(|n| n.trim().to_string()),
        params.description,
        params.target_days,
        status,
    )?;

    storage.save(&mut habit)?;
    tracing::info!("Updated habit '{}' ({})", habit.name, params.habit_id);

    let message = match status {
        Some(HabitStatus::Archived) => format!("🗄️ Archived habit '{}'", habit.name),
        Some(HabitStatus::Completed) => format!("🏁 Marked habit '{}' as completed", habit.name),
        _ => format!("✅ Updated habit '{}'", habit.name),
    };

    Ok(UpdateHabitResponse {
        success: true,
        habit: habit.to_record(),
        message,
    })
}
