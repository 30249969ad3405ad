/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits. It handles all SQL queries and data conversion.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Statement};

use crate::domain::{parse_date, Habit, HabitId, HabitStats, HabitStatus};
use crate::storage::{migrations, HabitStorage, StorageError};

/// SQLite-based storage implementation
///
/// Only the database path is kept. Every operation opens its own
/// connection and drops it before returning, so a `SqliteStorage` can be
/// cloned freely and shared between independent callers.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db_path: PathBuf,
}

/// A `habits` row as read from the database, before validation
struct HabitRow {
    id: i64,
    name: String,
    description: Option<String>,
    target_days: u32,
    creation_date: String,
    status: String,
}

impl HabitRow {
    const COLUMNS: &'static str = "id, name, description, target_days, creation_date, status";

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            target_days: row.get(3)?,
            creation_date: row.get(4)?,
            status: row.get(5)?,
        })
    }

    /// Validate the text columns and attach the completion dates
    fn into_habit(self, completions: Vec<NaiveDate>) -> Result<Habit, StorageError> {
        let creation_date = parse_date(&self.creation_date)?;
        let status: HabitStatus = self.status.parse()?;

        Ok(Habit::from_existing(
            Some(HabitId(self.id)),
            self.name,
            self.description.unwrap_or_default(),
            self.target_days,
            creation_date,
            status,
            completions,
        ))
    }
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This creates the parent directory if needed, opens the database file
    /// once and runs any necessary migrations.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let storage = Self { db_path };
        let mut conn = storage.connect()?;
        migrations::initialize_database(&mut conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", storage.db_path);

        Ok(storage)
    }

    /// Location of the database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection scoped to a single operation
    fn connect(&self) -> Result<Connection, StorageError> {
        let conn = Connection::open(&self.db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Cascading deletes depend on this; it is a per-connection setting
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        Ok(conn)
    }

    /// Completion dates for one habit, ascending
    fn completion_dates(stmt: &mut Statement<'_>, habit_id: i64) -> Result<Vec<NaiveDate>, StorageError> {
        let raw = stmt
            .query_map(params![habit_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let dates = raw
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(dates)
    }
}

impl HabitStorage for SqliteStorage {
    fn save(&self, habit: &mut Habit) -> Result<HabitId, StorageError> {
        let mut conn = self.connect()?;
        // Dropping the transaction without commit rolls everything back
        let tx = conn.transaction()?;

        let habit_id = match habit.id {
            None => {
                tx.execute(
                    "INSERT INTO habits (name, description, target_days, creation_date, status)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        habit.name,
                        habit.description,
                        habit.target_days,
                        habit.creation_date(),
                        habit.status.as_str()
                    ],
                )?;
                HabitId(tx.last_insert_rowid())
            }
            Some(id) => {
                let rows_affected = tx.execute(
                    "UPDATE habits SET
                        name = ?2,
                        description = ?3,
                        target_days = ?4,
                        status = ?5
                     WHERE id = ?1",
                    params![
                        id.value(),
                        habit.name,
                        habit.description,
                        habit.target_days,
                        habit.status.as_str()
                    ],
                )?;

                if rows_affected == 0 {
                    return Err(StorageError::HabitNotFound { habit_id: id });
                }
                id
            }
        };

        // Full replace: the stored set mirrors the in-memory set exactly
        tx.execute(
            "DELETE FROM completions WHERE habit_id = ?1",
            params![habit_id.value()],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO completions (habit_id, date) VALUES (?1, ?2)"
            )?;
            for date in habit.completions() {
                stmt.execute(params![habit_id.value(), date])?;
            }
        }

        tx.commit()?;
        habit.id = Some(habit_id);

        tracing::debug!(
            "Saved habit: {} ({}) with {} completions",
            habit.name,
            habit_id,
            habit.completion_count()
        );
        Ok(habit_id)
    }

    fn load_all(&self) -> Result<Vec<Habit>, StorageError> {
        let conn = self.connect()?;

        let mut habit_stmt = conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY id ASC",
            HabitRow::COLUMNS
        ))?;
        let rows = habit_stmt
            .query_map([], HabitRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut completion_stmt = conn.prepare(
            "SELECT date FROM completions WHERE habit_id = ?1 ORDER BY date ASC"
        )?;

        let mut habits = Vec::with_capacity(rows.len());
        for row in rows {
            let dates = Self::completion_dates(&mut completion_stmt, row.id)?;
            habits.push(row.into_habit(dates)?);
        }

        tracing::debug!("Loaded {} habits", habits.len());
        Ok(habits)
    }

    fn get_habit(&self, habit_id: HabitId) -> Result<Option<Habit>, StorageError> {
        let conn = self.connect()?;

        let row = conn
            .query_row(
                &format!("SELECT {} FROM habits WHERE id = ?1", HabitRow::COLUMNS),
                params![habit_id.value()],
                HabitRow::from_row,
            )
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut completion_stmt = conn.prepare(
            "SELECT date FROM completions WHERE habit_id = ?1 ORDER BY date ASC"
        )?;
        let dates = Self::completion_dates(&mut completion_stmt, row.id)?;
        let habit = row.into_habit(dates)?;
        Ok(Some(habit))
    }

    fn delete(&self, habit_id: HabitId) -> Result<bool, StorageError> {
        let conn = self.connect()?;
        let rows_affected = conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.value()],
        )?;

        if rows_affected == 0 {
            tracing::debug!("Delete of unknown habit {} ignored", habit_id);
        } else {
            tracing::debug!("Deleted habit: {}", habit_id);
        }
        Ok(rows_affected > 0)
    }

    fn stats(&self, habit_id: HabitId) -> Result<Option<HabitStats>, StorageError> {
        let conn = self.connect()?;

        let result = conn
            .query_row(
                "SELECT h.target_days, COUNT(c.date)
                 FROM habits h
                 LEFT JOIN completions c ON c.habit_id = h.id
                 WHERE h.id = ?1
                 GROUP BY h.id",
                params![habit_id.value()],
                |row| Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        let stats = result.map(|(target_days, count)| {
            HabitStats::new(habit_id, count.max(0) as u64, target_days)
        });
        Ok(stats)
    }
}
