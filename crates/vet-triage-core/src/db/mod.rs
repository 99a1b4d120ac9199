//! Database layer for vet-triage.

mod conditions;
mod inventory;
mod schema;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::catalog::CatalogSnapshot;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Everything the engine needs for one request, read in one pass.
    pub fn load_snapshot(&self) -> DbResult<CatalogSnapshot> {
        let snapshot = CatalogSnapshot {
            conditions: self.list_conditions()?,
            inventory: self.list_inventory_items()?,
            medication_hints: self.medication_hints()?,
        };

        tracing::debug!(
            conditions = snapshot.conditions.len(),
            inventory = snapshot.inventory.len(),
            hints = snapshot.medication_hints.len(),
            "catalog snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Replace the stored catalog with the contents of a snapshot.
    pub fn import_snapshot(&mut self, snapshot: &CatalogSnapshot) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM medication_hints; DELETE FROM conditions; DELETE FROM inventory_items;",
        )?;
        for condition in &snapshot.conditions {
            conditions::upsert_condition(&tx, condition)?;
        }
        for item in &snapshot.inventory {
            inventory::upsert_inventory_item(&tx, item)?;
        }
        for (name, medications) in &snapshot.medication_hints {
            conditions::set_medication_hints(&tx, name, medications)?;
        }
        tx.commit()?;

        tracing::info!(
            conditions = snapshot.conditions.len(),
            inventory = snapshot.inventory.len(),
            "catalog imported"
        );
        Ok(())
    }
}
