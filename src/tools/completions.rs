/// Tool for browsing completion history
///
/// This module implements the habit_completions tool: every completion of
/// one habit, or every habit completed on one day.

use serde::{Deserialize, Serialize};
use crate::analytics::{AnalyticsEngine, DailyCompletion};
use crate::domain::{format_date, parse_date, DomainError, HabitId};
use crate::storage::HabitStorage;
use crate::tools::{require_habit, ToolError};

#[derive(Debug, Default, Deserialize)]
pub struct CompletionsParams {
    #[serde(default)]
    pub habit_id: Option<HabitId>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionsResponse {
    /// History of a single habit
    Habit {
        habit_id: HabitId,
        habit_name: String,
        completions: Vec<String>,
        total: usize,
    },
    /// Habits done on a single day
    Date {
        date: String,
        total_completions: usize,
        completions: Vec<DailyCompletion>,
    },
}

/// List completions by habit or by date
///
/// Exactly one of `habit_id` and `date` must be given.
pub fn get_completions<S: HabitStorage>(
    storage: &S,
    params: CompletionsParams,
) -> Result<CompletionsResponse, ToolError> {
    match (params.habit_id, params.date) {
        (Some(habit_id), None) => {
            let habit = require_habit(storage, habit_id)?;
            let completions: Vec<String> = habit.completions().map(format_date).collect();
            Ok(CompletionsResponse::Habit {
                habit_id,
                habit_name: habit.name,
                total: completions.len(),
                completions,
            })
        }
        (None, Some(date)) => {
            let date = parse_date(&date)?;
            let habits = storage.load_all()?;
            let completions = AnalyticsEngine::new().completions_on(&habits, date);
            Ok(CompletionsResponse::Date {
                date: format_date(date),
                total_completions: completions.len(),
                completions,
            })
        }
        _ => Err(ToolError::Validation(DomainError::Validation {
            message: "Provide exactly one of 'habit_id' or 'date'".to_string(),
        })),
    }
}

impl CompletionsResponse {
    /// Human-readable rendering
    pub fn message(&self) -> String {
        match self {
            CompletionsResponse::Habit { habit_name, completions, total, .. } => {
                if completions.is_empty() {
                    format!("'{}' has no completions yet", habit_name)
                } else {
                    format!("'{}' completed {} times: {}", habit_name, total, completions.join(", "))
                }
            }
            CompletionsResponse::Date { date, completions, .. } => {
                if completions.is_empty() {
                    format!("No habits completed on {}", date)
                } else {
                    let names: Vec<&str> = completions.iter().map(|c| c.habit_name.as_str()).collect();
                    format!("Completed on {}: {}", date, names.join(", "))
                }
            }
        }
    }
}
