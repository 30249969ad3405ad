/// Per-habit statistics
///
/// `HabitStats` is the small projection the store answers for a single
/// habit id. The rate uses the same capped formula as `Habit`.

use serde::{Deserialize, Serialize};
use crate::domain::{completion_rate, HabitId};

/// Completion count and rate for one habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: HabitId,
    pub completions_count: u64,
    pub target_days: u32,
    /// Completion rate (0.0 to 1.0)
    pub completion_rate: f64,
}

impl HabitStats {
    pub fn new(habit_id: HabitId, completions_count: u64, target_days: u32) -> Self {
        Self {
            habit_id,
            completions_count,
            target_days,
            completion_rate: completion_rate(completions_count, target_days),
        }
    }

    /// Whether the completion count has reached the target
    pub fn target_reached(&self) -> bool {
        self.target_days > 0 && self.completions_count >= self.target_days as u64
    }
}

/// Encouraging one-liner for a streak length
pub fn streak_message(streak: u32) -> String {
    match streak {
        0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
        1 => "Great start! One day down, keep the momentum going.".to_string(),
        2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", streak),
        7..=13 => format!("Excellent! {} days strong. You're in the groove now!", streak),
        14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", streak),
        _ => format!("Incredible! {} days of consistency. Keep it going!", streak),
    }
}
