/// Tool for creating new habits
///
/// This module implements the habit_create tool.

use serde::{Deserialize, Serialize};
use crate::domain::{Habit, HabitRecord, DEFAULT_TARGET_DAYS};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize)]
pub struct CreateHabitParams {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_days: Option<u32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit: HabitRecord,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let target_days = params.target_days.unwrap_or(DEFAULT_TARGET_DAYS);
    Habit::validate_target(target_days)?;

    let name = params.name.trim().to_string();
    let mut habit = Habit::new(name)?
        .with_description(params.description.unwrap_or_default())?
        .with_target_days(target_days);

    let habit_id = storage.save(&mut habit)?;
    tracing::info!("Created habit '{}' ({})", habit.name, habit_id);

    Ok(CreateHabitResponse {
        success: true,
        message: format!(
            "✅ Created habit '{}' (ID {}) with a target of {} {}. Ready to start your streak!",
            habit.name,
            habit_id,
            target_days,
            crate::tools::days(target_days)
        ),
        habit: habit.to_record(),
    })
}
