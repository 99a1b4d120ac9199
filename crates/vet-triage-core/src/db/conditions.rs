//! Condition catalog and medication hint operations.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Condition;

const CONDITION_COLUMNS: &str = "id, name, description, severity, urgency, symptoms, species, \
     treatment, prevention, medications";

impl Database {
    /// Insert or update a condition.
    pub fn upsert_condition(&self, condition: &Condition) -> DbResult<()> {
        upsert_condition(&self.conn, condition)
    }

    /// Get a condition by id.
    pub fn get_condition(&self, id: u32) -> DbResult<Option<Condition>> {
        let sql = format!("SELECT {CONDITION_COLUMNS} FROM conditions WHERE id = ?");
        let result = self
            .conn
            .query_row(&sql, [id], ConditionRow::from_row)
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }

    /// All conditions in the order they were first stored.
    pub fn list_conditions(&self) -> DbResult<Vec<Condition>> {
        let sql = format!("SELECT {CONDITION_COLUMNS} FROM conditions ORDER BY position");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], ConditionRow::from_row)?;

        let mut conditions = Vec::new();
        for row in rows {
            conditions.push(row?.try_into()?);
        }
        Ok(conditions)
    }

    /// Delete a condition.
    pub fn delete_condition(&self, id: u32) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM conditions WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Replace the medication names recommended for a condition.
    pub fn set_medication_hints(&self, condition_name: &str, medications: &[String]) -> DbResult<()> {
        set_medication_hints(&self.conn, condition_name, medications)
    }

    /// Condition name → medication names.
    pub fn medication_hints(&self) -> DbResult<BTreeMap<String, Vec<String>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT condition_name, medications FROM medication_hints")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut hints = BTreeMap::new();
        for row in rows {
            let (name, medications) = row?;
            hints.insert(name, serde_json::from_str(&medications)?);
        }
        Ok(hints)
    }
}

pub(super) fn upsert_condition(conn: &Connection, condition: &Condition) -> DbResult<()> {
    if condition.name.trim().is_empty() {
        return Err(DbError::Constraint(format!(
            "condition {} has an empty name",
            condition.id
        )));
    }

    let symptoms_json = serde_json::to_string(&condition.symptoms)?;
    let species_json = serde_json::to_string(&condition.species)?;
    let medications_json = serde_json::to_string(&condition.medications)?;

    conn.execute(
        r#"
        INSERT INTO conditions (
            id, position, name, description, severity, urgency, symptoms, species,
            treatment, prevention, medications, updated_at
        ) VALUES (
            ?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM conditions),
            ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, datetime('now')
        )
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            severity = excluded.severity,
            urgency = excluded.urgency,
            symptoms = excluded.symptoms,
            species = excluded.species,
            treatment = excluded.treatment,
            prevention = excluded.prevention,
            medications = excluded.medications,
            updated_at = datetime('now')
        "#,
        params![
            condition.id,
            condition.name,
            condition.description,
            condition.severity,
            condition.urgency,
            symptoms_json,
            species_json,
            condition.treatment,
            condition.prevention,
            medications_json,
        ],
    )?;
    Ok(())
}

pub(super) fn set_medication_hints(
    conn: &Connection,
    condition_name: &str,
    medications: &[String],
) -> DbResult<()> {
    let medications_json = serde_json::to_string(medications)?;
    conn.execute(
        r#"
        INSERT INTO medication_hints (condition_name, medications, updated_at)
        VALUES (?1, ?2, datetime('now'))
        ON CONFLICT(condition_name) DO UPDATE SET
            medications = excluded.medications,
            updated_at = datetime('now')
        "#,
        params![condition_name, medications_json],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct ConditionRow {
    id: u32,
    name: String,
    description: String,
    severity: String,
    urgency: String,
    symptoms: String,
    species: String,
    treatment: String,
    prevention: String,
    medications: String,
}

impl ConditionRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            severity: row.get(3)?,
            urgency: row.get(4)?,
            symptoms: row.get(5)?,
            species: row.get(6)?,
            treatment: row.get(7)?,
            prevention: row.get(8)?,
            medications: row.get(9)?,
        })
    }
}

impl TryFrom<ConditionRow> for Condition {
    type Error = DbError;

    fn try_from(row: ConditionRow) -> Result<Self, Self::Error> {
        Ok(Condition {
            id: row.id,
            name: row.name,
            description: row.description,
            severity: row.severity,
            urgency: row.urgency,
            symptoms: serde_json::from_str(&row.symptoms)?,
            species: serde_json::from_str(&row.species)?,
            treatment: row.treatment,
            prevention: row.prevention,
            medications: serde_json::from_str(&row.medications)?,
        })
    }
}
