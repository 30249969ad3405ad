/// Analytics engine for summarizing habit progress
///
/// This module computes the cross-habit views: overall totals and averages,
/// and which habits were completed on a given day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{format_date, Habit, HabitId, HabitStatus};

/// Totals across every habit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitSummary {
    pub total_habits: usize,
    pub active_habits: usize,
    pub total_completions: usize,
    /// Mean completion rate, rounded to two decimals
    pub average_completion_rate: f64,
    /// Name of the habit with the most completions
    pub most_completed_habit: Option<String>,
}

/// One habit that was completed on a particular day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCompletion {
    pub habit_id: Option<HabitId>,
    pub habit_name: String,
    pub date: String,
}

/// Analytics engine for processing habit data
///
/// Stateless; all inputs come from a freshly loaded habit list.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Overall totals for a list of habits
    pub fn summarize(&self, habits: &[Habit]) -> HabitSummary {
        let total_habits = habits.len();
        let active_habits = habits
            .iter()
            .filter(|h| h.status == HabitStatus::Active)
            .count();
        let total_completions = habits.iter().map(|h| h.completion_count()).sum();

        let average_completion_rate = if habits.is_empty() {
            0.0
        } else {
            let mean = habits.iter().map(|h| h.completion_rate()).sum::<f64>() / total_habits as f64;
            (mean * 100.0).round() / 100.0
        };

        // max_by_key keeps the last maximum; reversing makes ties go to the lowest id
        let most_completed_habit = habits
            .iter()
            .rev()
            .max_by_key(|h| h.completion_count())
            .map(|h| h.name.clone());

        HabitSummary {
            total_habits,
            active_habits,
            total_completions,
            average_completion_rate,
            most_completed_habit,
        }
    }

    /// Habits completed on `date`, in the order given
    pub fn completions_on(&self, habits: &[Habit], date: NaiveDate) -> Vec<DailyCompletion> {
        habits
            .iter()
            .filter(|h| h.is_completed_on(date))
            .map(|h| DailyCompletion {
                habit_id: h.id,
                habit_name: h.name.clone(),
                date: format_date(date),
            })
            .collect()
    }
}
