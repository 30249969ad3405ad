/// Tools for logging and un-logging habit completions
///
/// This module implements the habit_log and habit_unlog tools. Both load
/// the current habit, change its completion set and save the whole habit
/// back.

use serde::{Deserialize, Serialize};
use crate::domain::{format_date, parse_date, streak_message, today, HabitId};
use crate::storage::HabitStorage;
use crate::tools::{days, require_habit, ToolError};

/// Parameters for logging a habit completion
#[derive(Debug, Deserialize)]
pub struct LogHabitParams {
    pub habit_id: HabitId,
    /// `YYYY-MM-DD`, defaults to today
    #[serde(default)]
    pub date: Option<String>,
}

/// Response from logging a habit
#[derive(Debug, Serialize)]
pub struct LogHabitResponse {
    pub success: bool,
    /// False when the day was already logged
    pub newly_recorded: bool,
    pub date: String,
    pub current_streak: u32,
    pub completion_rate: f64,
    pub message: String,
}

/// Log a habit completion using the provided storage
pub fn log_habit<S: HabitStorage>(
    storage: &S,
    params: LogHabitParams,
) -> Result<LogHabitResponse, ToolError> {
    let date = match params.date {
        Some(ref s) => parse_date(s)?,
        None => today(),
    };

    let mut habit = require_habit(storage, params.habit_id)?;
    let newly_recorded = habit.mark_completed(date);
    if newly_recorded {
        storage.save(&mut habit)?;
        tracing::info!("Logged habit '{}' for {}", habit.name, date);
    }

    let current_streak = habit.streak();
    let message = if newly_recorded {
        format!(
            "🔥 Logged '{}' for {}! Current streak: {} {}. {}",
            habit.name,
            format_date(date),
            current_streak,
            days(current_streak),
            streak_message(current_streak)
        )
    } else {
        format!("'{}' was already logged for {}", habit.name, format_date(date))
    };

    Ok(LogHabitResponse {
        success: true,
        newly_recorded,
        date: format_date(date),
        current_streak,
        completion_rate: habit.completion_rate(),
        message,
    })
}

/// Parameters for removing a habit completion
#[derive(Debug, Deserialize)]
pub struct UnlogHabitParams {
    pub habit_id: HabitId,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Response from removing a habit completion
#[derive(Debug, Serialize)]
pub struct UnlogHabitResponse {
    pub success: bool,
    pub date: String,
    pub remaining_completions: usize,
    pub message: String,
}

/// Remove the completion for one day
pub fn unlog_habit<S: HabitStorage>(
    storage: &S,
    params: UnlogHabitParams,
) -> Result<UnlogHabitResponse, ToolError> {
    let date = parse_date(&params.date)?;

    let mut habit = require_habit(storage, params.habit_id)?;
    if !habit.remove_completion(date) {
        return Err(ToolError::CompletionNotFound {
            habit_id: params.habit_id,
            date: format_date(date),
        });
    }
    storage.save(&mut habit)?;
    tracing::info!("Removed completion of '{}' for {}", habit.name, date);

    Ok(UnlogHabitResponse {
        success: true,
        date: format_date(date),
        remaining_completions: habit.completion_count(),
        message: format!("↩️ Removed completion of '{}' for {}", habit.name, format_date(date)),
    })
}
