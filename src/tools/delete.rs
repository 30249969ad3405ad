/// Tool for deleting habits
///
/// This module implements the habit_delete tool. Deleting an id that does
/// not exist is not an error.

use serde::{Deserialize, Serialize};
use crate::domain::HabitId;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: HabitId,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    /// Whether a habit with that id existed
    pub deleted: bool,
    pub message: String,
}

/// Delete a habit and all of its completions
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let deleted = storage.delete(params.habit_id)?;

    let message = if deleted {
        tracing::info!("Deleted habit {}", params.habit_id);
        format!("🗑️ Deleted habit {} and its history", params.habit_id)
    } else {
        format!("No habit with ID {}; nothing to delete", params.habit_id)
    };

    Ok(DeleteHabitResponse {
        success: true,
        deleted,
        message,
    })
}
