/// Public library interface for the Habit Tracker
///
/// This module exports the habit domain model, the SQLite store, the
/// tools built on top of them and the JSON-RPC server that exposes the
/// tools.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
pub mod tools;
pub mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HabitStorage, SqliteStorage, StorageError};
pub use analytics::{AnalyticsEngine, DailyCompletion, HabitSummary};
pub use mcp::McpServer;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker server: the store plus the analytics over it
///
/// This is what the JSON-RPC layer is handed; it owns no state besides
/// the database location.
pub struct HabitTrackerServer {
    storage: SqliteStorage,
    analytics: AnalyticsEngine,
}

impl HabitTrackerServer {
    /// Create a new habit tracker server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Tracker with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;

        Ok(Self {
            storage,
            analytics: AnalyticsEngine::new(),
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method returns when stdin is closed or reading fails.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Fail early if the database is unreadable
        let habits = self.storage.load_all()?;
        let summary = self.analytics.summarize(&habits);
        tracing::info!(
            "Server started successfully, found {} existing habits ({} active)",
            summary.total_habits,
            summary.active_habits
        );

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the analytics engine
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
