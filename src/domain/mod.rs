/// Domain module containing core business logic and data types
///
/// This module defines the Habit entity, its serialized record form and the
/// derived statistics. Nothing in here touches the database.

pub mod habit;
pub mod record;
pub mod stats;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use record::*;
pub use stats::*;
pub use types::*;

use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

/// Date format used everywhere a date crosses a text boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's calendar date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` string into a date
///
/// Only the canonical form is accepted: chrono alone would also take
/// unpadded fields, a leading sign or surrounding whitespace.
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s));

    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
    if format_date(date) != s {
        return Err(invalid());
    }
    Ok(date)
}

/// Render a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
