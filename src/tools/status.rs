/// Tool for checking habit progress
///
/// This module implements the habit_status tool: statistics for one habit,
/// or the overall summary when no habit is named.

use serde::{Deserialize, Serialize};
use crate::analytics::{AnalyticsEngine, HabitSummary};
use crate::domain::{HabitId, HabitStats};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    /// If omitted, summarizes all habits
    #[serde(default)]
    pub habit_id: Option<HabitId>,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusResponse {
    Habit { stats: HabitStats, message: String },
    Overall { summary: HabitSummary, message: String },
}

impl StatusResponse {
    pub fn message(&self) -> &str {
        match self {
            StatusResponse::Habit { message, .. } | StatusResponse::Overall { message, .. } => message,
        }
    }
}

/// Get status for one habit or for all of them
pub fn get_habit_status<S: HabitStorage>(
    storage: &S,
    params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    if let Some(habit_id) = params.habit_id {
        let stats = storage
            .stats(habit_id)?
            .ok_or(ToolError::HabitNotFound { habit_id })?;

        let message = format!(
            "📊 Habit {}: {}/{} completions ({:.1}%){}",
            habit_id,
            stats.completions_count,
            stats.target_days,
            stats.completion_rate * 100.0,
            if stats.target_reached() { " 🎉 target reached" } else { "" }
        );
        return Ok(StatusResponse::Habit { stats, message });
    }

    let habits = storage.load_all()?;
    let summary = AnalyticsEngine::new().summarize(&habits);

    let message = if summary.total_habits == 0 {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        format!(
            "📊 {} habits ({} active), {} completions in total. Average completion rate: {:.0}%{}",
            summary.total_habits,
            summary.active_habits,
            summary.total_completions,
            summary.average_completion_rate * 100.0,
            summary
                .most_completed_habit
                .as_ref()
                .map(|name| format!("\nMost completed: {}", name))
                .unwrap_or_default()
        )
    };

    Ok(StatusResponse::Overall { summary, message })
}
