/// Serialized form of a habit
///
/// `HabitRecord` is the canonical wire representation: every field of the
/// habit with dates rendered as `YYYY-MM-DD`, plus the derived metrics.

use serde::{Deserialize, Serialize};
use crate::domain::{format_date, parse_date, DomainError, Habit, HabitId, HabitStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: Option<HabitId>,
    pub name: String,
    pub description: String,
    pub target_days: u32,
    pub creation_date: String,
    pub status: String,
    pub completions: Vec<String>,
    /// Derived; ignored when parsing back into a habit
    #[serde(default)]
    pub completion_rate: f64,
    /// Derived; ignored when parsing back into a habit
    #[serde(default)]
    pub streak: u32,
}

impl Habit {
    /// Serialize this habit, computing the metrics against today's date
    pub fn to_record(&self) -> HabitRecord {
        HabitRecord {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            target_days: self.target_days,
            creation_date: format_date(self.creation_date()),
            status: self.status.as_str().to_string(),
            completions: self.completions().map(format_date).collect(),
            completion_rate: self.completion_rate(),
            streak: self.streak(),
        }
    }
}

impl TryFrom<HabitRecord> for Habit {
    type Error = DomainError;

    /// Parse a record back into a habit
    ///
    /// Malformed dates or an unknown status are rejected rather than
    /// defaulted.
    fn try_from(record: HabitRecord) -> Result<Self, Self::Error> {
        let creation_date = parse_date(&record.creation_date)?;
        let status: HabitStatus = record.status.parse()?;
        let completions = record
            .completions
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Habit::from_existing(
            record.id,
            record.name,
            record.description,
            record.target_days,
            creation_date,
            status,
            completions,
        ))
    }
}
