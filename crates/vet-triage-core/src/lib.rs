//! Vet-Triage Core Library
//!
//! Veterinary symptom matching and diagnosis suggestion, with stock-aware
//! medication linking against the clinic inventory.
//!
//! # Architecture
//!
//! ```text
//! Reported symptoms
//!        │
//!   Normalization ── lowercase, strip accents, collapse whitespace
//!        │
//!   Pair Scoring ─── exact / containment / shared words
//!        │
//!   Aggregation ──── best catalog symptom per input
//!        │
//!   Ranking ──────── percentage, threshold, sort, truncate
//!        │
//!   Medication Linking ── hints → inventory items, in stock first
//!        │
//!        ▼
//!  DiagnosisReport (Matches | NoMatch)
//! ```
//!
//! # Core Principle
//!
//! **Results are suggestions only.** Every report must be confirmed by a
//! veterinarian.
//!
//! # Modules
//!
//! - [`matcher`]: Normalizer, scorer, aggregator, ranker and medication linker
//! - [`catalog`]: In-memory catalog snapshot handed to the engine
//! - [`models`]: Domain types (Condition, InventoryItem, DiagnosisReport, etc.)
//! - [`knowledge`]: Triage, exam and diet lookup tables
//! - [`stock`]: Inventory search and stock alerts
//! - [`db`]: SQLite persistence for the catalog and inventory
//! - [`config`]: Engine configuration

pub mod catalog;
pub mod config;
pub mod db;
pub mod knowledge;
pub mod matcher;
pub mod models;
pub mod stock;

// Re-export commonly used types
pub use catalog::CatalogSnapshot;
pub use config::EngineConfig;
pub use db::Database;
pub use knowledge::KnowledgeBase;
pub use matcher::{normalize, DiagnosisEngine, MatchError};
pub use models::{
    Condition, DiagnosisOutcome, DiagnosisReport, InventoryItem, MatchResult,
    MedicationSuggestion, StockState, SymptomQuery, Urgency,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetTriageError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for VetTriageError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => VetTriageError::NotFound(what),
            db::DbError::Constraint(msg) => VetTriageError::InvalidInput(msg),
            other => VetTriageError::DatabaseError(other.to_string()),
        }
    }
}

impl From<MatchError> for VetTriageError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::InvalidInput(msg) => VetTriageError::InvalidInput(msg),
        }
    }
}

impl From<knowledge::KnowledgeError> for VetTriageError {
    fn from(e: knowledge::KnowledgeError) -> Self {
        match e {
            knowledge::KnowledgeError::InvalidInput(msg) => VetTriageError::InvalidInput(msg),
            other => VetTriageError::SerializationError(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for VetTriageError {
    fn from(e: config::ConfigError) -> Self {
        VetTriageError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for VetTriageError {
    fn from(e: serde_json::Error) -> Self {
        VetTriageError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for VetTriageError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        VetTriageError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a `tracing` subscriber filtered by `filter` (e.g. "vet_triage_core=debug").
///
/// Only the first call installs a subscriber; later calls are no-ops.
#[uniffi::export]
pub fn init_logging(filter: String) -> Result<(), VetTriageError> {
    let filter =
        EnvFilter::try_new(&filter).map_err(|e| VetTriageError::InvalidInput(e.to_string()))?;

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("logging already initialised");
    }
    Ok(())
}

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<VetTriageCore>, VetTriageError> {
    let db = Database::open(&path)?;
    VetTriageCore::new(db, EngineConfig::default())
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<VetTriageCore>, VetTriageError> {
    let db = Database::open_in_memory()?;
    VetTriageCore::new(db, EngineConfig::default())
}

/// Open or create a database with a JSON engine configuration.
#[uniffi::export]
pub fn open_database_with_config(
    path: String,
    config_json: String,
) -> Result<Arc<VetTriageCore>, VetTriageError> {
    let config = EngineConfig::from_json(&config_json)?;
    let db = Database::open(&path)?;
    VetTriageCore::new(db, config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine and database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct VetTriageCore {
    db: Arc<Mutex<Database>>,
    engine: DiagnosisEngine,
    knowledge: KnowledgeBase,
}

impl VetTriageCore {
    fn new(db: Database, config: EngineConfig) -> Result<Arc<Self>, VetTriageError> {
        config.validate()?;
        Ok(Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            engine: DiagnosisEngine::new(config),
            knowledge: KnowledgeBase::builtin()?,
        }))
    }

    /// Current catalog contents; the lock is released before matching.
    fn snapshot(&self) -> Result<CatalogSnapshot, VetTriageError> {
        let db = self.db.lock()?;
        Ok(db.load_snapshot()?)
    }
}

#[uniffi::export]
impl VetTriageCore {
    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Add or update a condition.
    pub fn upsert_condition(&self, condition: FfiCondition) -> Result<(), VetTriageError> {
        let db = self.db.lock()?;
        db.upsert_condition(&condition.into())?;
        Ok(())
    }

    /// Get a condition by id.
    pub fn get_condition(&self, id: u32) -> Result<Option<FfiCondition>, VetTriageError> {
        let db = self.db.lock()?;
        Ok(db.get_condition(id)?.map(|c| c.into()))
    }

    /// All conditions in catalog order.
    pub fn list_conditions(&self) -> Result<Vec<FfiCondition>, VetTriageError> {
        let db = self.db.lock()?;
        Ok(db.list_conditions()?.into_iter().map(|c| c.into()).collect())
    }

    /// Delete a condition.
    pub fn delete_condition(&self, id: u32) -> Result<bool, VetTriageError> {
        let db = self.db.lock()?;
        Ok(db.delete_condition(id)?)
    }

    /// Replace the medication names recommended for a condition.
    pub fn set_medication_hints(
        &self,
        condition_name: String,
        medications: Vec<String>,
    ) -> Result<(), VetTriageError> {
        let db = self.db.lock()?;
        db.set_medication_hints(&condition_name, &medications)?;
        Ok(())
    }

    /// Replace the whole catalog with a JSON snapshot.
    pub fn import_catalog_json(&self, json: String) -> Result<(), VetTriageError> {
        let snapshot = CatalogSnapshot::from_json(&json)?;
        let mut db = self.db.lock()?;
        db.import_snapshot(&snapshot)?;
        Ok(())
    }

    /// SHA-256 fingerprint of the current catalog.
    pub fn catalog_fingerprint(&self) -> Result<String, VetTriageError> {
        Ok(self.snapshot()?.fingerprint())
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    /// Add or update an inventory item.
    pub fn upsert_inventory_item(&self, item: FfiInventoryItem) -> Result<(), VetTriageError> {
        let item = InventoryItem::try_from(item)?;
        let db = self.db.lock()?;
        db.upsert_inventory_item(&item)?;
        Ok(())
    }

    /// Get an inventory item by SKU.
    pub fn get_inventory_item(
        &self,
        sku: String,
    ) -> Result<Option<FfiInventoryItem>, VetTriageError> {
        let db = self.db.lock()?;
        Ok(db.get_inventory_item(&sku)?.map(|i| i.into()))
    }

    /// Add `delta` units (negative to dispense); returns the new quantity.
    pub fn adjust_stock(&self, sku: String, delta: i64, reason: String) -> Result<u32, VetTriageError> {
        let mut db = self.db.lock()?;
        Ok(db.adjust_stock(&sku, delta, &reason)?)
    }

    /// Search the inventory by name and category.
    pub fn search_inventory(
        &self,
        text: Option<String>,
        category: Option<String>,
        only_available: bool,
    ) -> Result<Vec<FfiStockedItem>, VetTriageError> {
        let snapshot = self.snapshot()?;
        let query = models::InventoryQuery {
            text,
            category,
            only_available,
        };
        let result = stock::search_inventory(
            &snapshot.inventory,
            &query,
            &self.engine.config().inventory,
        );
        Ok(result.items.into_iter().map(|i| i.into()).collect())
    }

    /// Stock and expiry alerts as of today, as JSON.
    pub fn stock_alerts_json(&self) -> Result<String, VetTriageError> {
        let snapshot = self.snapshot()?;
        let today = chrono::Local::now().date_naive();
        let report = stock::stock_alerts(&snapshot.inventory, &self.engine.config().inventory, today);
        Ok(serde_json::to_string_pretty(&report)?)
    }

    // =========================================================================
    // Diagnosis Operations
    // =========================================================================

    /// Rank conditions for the reported symptoms.
    pub fn suggest_diagnoses(
        &self,
        symptoms: Vec<String>,
        species: Option<String>,
        limit: Option<u32>,
        include_medications: bool,
    ) -> Result<FfiDiagnosisReport, VetTriageError> {
        let query = SymptomQuery {
            symptoms,
            species,
            limit: limit.map(|l| l as usize),
            include_medications,
        };
        let snapshot = self.snapshot()?;
        let report = self.engine.suggest(&query, &snapshot)?;
        Ok(report.into())
    }

    /// Same as [`Self::suggest_diagnoses`], returning the full report as JSON.
    pub fn suggest_diagnoses_json(
        &self,
        symptoms: Vec<String>,
        species: Option<String>,
        limit: Option<u32>,
    ) -> Result<String, VetTriageError> {
        let query = SymptomQuery {
            symptoms,
            species,
            limit: limit.map(|l| l as usize),
            include_medications: true,
        };
        let snapshot = self.snapshot()?;
        let report = self.engine.suggest(&query, &snapshot)?;
        Ok(report.to_json()?)
    }

    /// Every known symptom, sorted.
    pub fn list_symptoms(&self) -> Result<Vec<String>, VetTriageError> {
        let snapshot = self.snapshot()?;
        Ok(matcher::SymptomVocabulary::from_conditions(&snapshot.conditions).symptoms())
    }

    /// Autocomplete over known symptoms.
    pub fn search_symptoms(&self, query: String, limit: u32) -> Result<Vec<String>, VetTriageError> {
        let snapshot = self.snapshot()?;
        let vocabulary = matcher::SymptomVocabulary::from_conditions(&snapshot.conditions);
        Ok(vocabulary.search(&query, limit as usize))
    }

    /// Look up a condition by name, with its medications.
    pub fn find_condition(
        &self,
        name: String,
    ) -> Result<Option<FfiConditionLookup>, VetTriageError> {
        let snapshot = self.snapshot()?;
        Ok(self.engine.lookup_condition(&name, &snapshot).map(|c| c.into()))
    }

    /// Conditions whose name contains the query.
    pub fn search_conditions(
        &self,
        query: String,
        species: Option<String>,
    ) -> Result<Vec<FfiConditionLookup>, VetTriageError> {
        let snapshot = self.snapshot()?;
        let found = self
            .engine
            .search_conditions(&query, species.as_deref(), &snapshot);
        Ok(found.into_iter().map(|c| c.into()).collect())
    }

    /// Stock-aware medications for a condition.
    pub fn medications_for_condition(
        &self,
        condition_name: String,
    ) -> Result<Vec<FfiMedication>, VetTriageError> {
        let snapshot = self.snapshot()?;
        let Some(condition) = snapshot.find_condition(&condition_name) else {
            return Err(VetTriageError::NotFound(format!("condition {condition_name}")));
        };
        let medications = self.engine.medications_for(&condition.name, &snapshot);
        Ok(medications.into_iter().map(|m| m.into()).collect())
    }

    // =========================================================================
    // Follow-up Operations
    // =========================================================================

    /// Keyword-based preliminary triage.
    pub fn triage(&self, symptoms: Vec<String>) -> FfiTriage {
        self.knowledge.triage.assess(&symptoms).into()
    }

    /// Exam services in stock suited to a condition.
    pub fn suggest_exams(&self, condition_name: String) -> Result<Vec<FfiExam>, VetTriageError> {
        let snapshot = self.snapshot()?;
        let exams = self.knowledge.exams.suggest(
            &condition_name,
            &snapshot.inventory,
            &self.engine.config().inventory.exam_category,
        );
        Ok(exams.into_iter().map(|e| e.into()).collect())
    }

    /// Diet plan for a patient profile, as JSON.
    pub fn recommend_diet_json(
        &self,
        species: String,
        life_stage: Option<String>,
        medical_condition: Option<String>,
    ) -> Result<String, VetTriageError> {
        let snapshot = self.snapshot()?;
        let plan = self.knowledge.diet.recommend(
            &species,
            life_stage.as_deref(),
            medical_condition.as_deref(),
            &snapshot.inventory,
        )?;
        Ok(serde_json::to_string_pretty(&plan)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe condition.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCondition {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub severity: String,
    pub urgency: String,
    pub symptoms: Vec<String>,
    pub species: Vec<String>,
    pub treatment: String,
    pub prevention: String,
    pub medications: Vec<String>,
}

impl From<Condition> for FfiCondition {
    fn from(c: Condition) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            severity: c.severity,
            urgency: c.urgency,
            symptoms: c.symptoms,
            species: c.species,
            treatment: c.treatment,
            prevention: c.prevention,
            medications: c.medications,
        }
    }
}

impl From<FfiCondition> for Condition {
    fn from(c: FfiCondition) -> Self {
        Condition {
            id: c.id,
            name: c.name,
            description: c.description,
            severity: c.severity,
            urgency: c.urgency,
            symptoms: c.symptoms,
            species: c.species,
            treatment: c.treatment,
            prevention: c.prevention,
            medications: c.medications,
        }
    }
}

/// FFI-safe inventory item. Dates are ISO 8601 (`YYYY-MM-DD`).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryItem {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub presentation: String,
    pub unit: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub unit_price: f64,
    pub expires_on: Option<String>,
    pub lot: Option<String>,
    pub supplier: Option<String>,
}

impl From<InventoryItem> for FfiInventoryItem {
    fn from(item: InventoryItem) -> Self {
        Self {
            sku: item.sku,
            name: item.name,
            category: item.category,
            presentation: item.presentation,
            unit: item.unit,
            quantity: item.quantity,
            min_stock: item.min_stock,
            unit_price: item.unit_price,
            expires_on: item.expires_on.map(|d| d.format("%Y-%m-%d").to_string()),
            lot: item.lot,
            supplier: item.supplier,
        }
    }
}

impl TryFrom<FfiInventoryItem> for InventoryItem {
    type Error = VetTriageError;

    fn try_from(item: FfiInventoryItem) -> Result<Self, Self::Error> {
        let expires_on = item
            .expires_on
            .filter(|d| !d.trim().is_empty())
            .map(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d"))
            .transpose()
            .map_err(|e| VetTriageError::InvalidInput(format!("expiry date: {e}")))?;

        Ok(InventoryItem {
            sku: item.sku,
            name: item.name,
            category: item.category,
            presentation: item.presentation,
            unit: item.unit,
            quantity: item.quantity,
            min_stock: item.min_stock,
            unit_price: item.unit_price,
            expires_on,
            lot: item.lot,
            supplier: item.supplier,
        })
    }
}

/// FFI-safe inventory search hit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStockedItem {
    pub item: FfiInventoryItem,
    pub stock_state: String,
}

impl From<models::StockedItem> for FfiStockedItem {
    fn from(stocked: models::StockedItem) -> Self {
        Self {
            stock_state: stocked.stock_state.as_str().to_string(),
            item: stocked.item.into(),
        }
    }
}

/// FFI-safe medication suggestion.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub presentation: String,
    pub quantity: u32,
    pub stock_state: String,
    pub unit_price: f64,
    pub recommended_as: String,
}

impl From<MedicationSuggestion> for FfiMedication {
    fn from(m: MedicationSuggestion) -> Self {
        Self {
            sku: m.sku,
            name: m.name,
            category: m.category,
            presentation: m.presentation,
            quantity: m.quantity,
            stock_state: m.stock_state.as_str().to_string(),
            unit_price: m.unit_price,
            recommended_as: m.recommended_as,
        }
    }
}

/// FFI-safe ranked condition.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMatchResult {
    pub condition_id: u32,
    pub condition_name: String,
    pub description: String,
    pub severity: String,
    pub urgency: String,
    pub treatment: String,
    pub prevention: String,
    pub species: Vec<String>,
    pub match_count: u32,
    pub matched_symptoms: Vec<String>,
    pub percentage: f64,
    pub medications: Vec<FfiMedication>,
}

impl From<MatchResult> for FfiMatchResult {
    fn from(r: MatchResult) -> Self {
        Self {
            condition_id: r.condition.id,
            condition_name: r.condition.name,
            description: r.condition.description,
            severity: r.condition.severity,
            urgency: r.condition.urgency,
            treatment: r.condition.treatment,
            prevention: r.condition.prevention,
            species: r.condition.species,
            match_count: r.match_count as u32,
            matched_symptoms: r.matched_symptoms,
            percentage: r.percentage,
            medications: r.medications.into_iter().map(|m| m.into()).collect(),
        }
    }
}

/// FFI-safe unmatched symptom.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUnmatchedSymptom {
    pub symptom: String,
    pub closest_known: Option<String>,
}

/// FFI-safe diagnosis report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiagnosisReport {
    pub report_id: String,
    pub generated_at: String,
    /// Query symptoms as received
    pub symptoms: Vec<String>,
    pub species: Option<String>,
    /// "matches" or "no_match"
    pub status: String,
    pub message: String,
    pub results: Vec<FfiMatchResult>,
    pub unmatched: Vec<FfiUnmatchedSymptom>,
    pub catalog_fingerprint: String,
}

impl From<DiagnosisReport> for FfiDiagnosisReport {
    fn from(report: DiagnosisReport) -> Self {
        let message = report.message().to_string();
        let (status, results) = match report.outcome {
            DiagnosisOutcome::Matches(results) => ("matches", results),
            DiagnosisOutcome::NoMatch => ("no_match", Vec::new()),
        };

        Self {
            report_id: report.report_id,
            generated_at: report.generated_at,
            symptoms: report.symptoms,
            species: report.species,
            status: status.to_string(),
            message,
            results: results.into_iter().map(|r| r.into()).collect(),
            unmatched: report
                .unmatched
                .into_iter()
                .map(|u| FfiUnmatchedSymptom {
                    symptom: u.symptom,
                    closest_known: u.closest_known,
                })
                .collect(),
            catalog_fingerprint: report.catalog_fingerprint,
        }
    }
}

/// FFI-safe condition lookup.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConditionLookup {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub severity: String,
    pub urgency: String,
    pub treatment: String,
    pub prevention: String,
    pub species: Vec<String>,
    pub symptoms: Vec<String>,
    pub medications: Vec<FfiMedication>,
}

impl From<models::ConditionLookup> for FfiConditionLookup {
    fn from(found: models::ConditionLookup) -> Self {
        Self {
            id: found.condition.id,
            name: found.condition.name,
            description: found.condition.description,
            severity: found.condition.severity,
            urgency: found.condition.urgency,
            treatment: found.condition.treatment,
            prevention: found.condition.prevention,
            species: found.condition.species,
            symptoms: found.symptoms,
            medications: found.medications.into_iter().map(|m| m.into()).collect(),
        }
    }
}

/// FFI-safe triage assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTriage {
    pub possible_conditions: Vec<String>,
    pub urgency: String,
    pub recommendations: Vec<String>,
    pub note: String,
}

impl From<models::TriageAssessment> for FfiTriage {
    fn from(t: models::TriageAssessment) -> Self {
        Self {
            possible_conditions: t.possible_conditions,
            urgency: t.urgency.as_str().to_string(),
            recommendations: t.recommendations,
            note: t.note,
        }
    }
}

/// FFI-safe exam suggestion.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExam {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub exam_kind: String,
}

impl From<models::ExamSuggestion> for FfiExam {
    fn from(e: models::ExamSuggestion) -> Self {
        Self {
            sku: e.sku,
            name: e.name,
            price: e.price,
            exam_kind: e.exam_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> Arc<VetTriageCore> {
        let core = open_database_in_memory().unwrap();
        core.upsert_condition(FfiCondition {
            id: 1,
            name: "Gastroenteritis".into(),
            description: String::new(),
            severity: "moderada".into(),
            urgency: "media".into(),
            symptoms: vec!["Vómito".into(), "Diarrea".into(), "Fiebre".into()],
            species: vec!["perro".into(), "gato".into()],
            treatment: String::new(),
            prevention: String::new(),
            medications: vec!["Suero Oral".into()],
        })
        .unwrap();
        core.upsert_inventory_item(FfiInventoryItem {
            sku: "SU-1".into(),
            name: "Suero Oral Rehidratante".into(),
            category: "Sueros".into(),
            presentation: "Frasco 500 mL".into(),
            unit: "frascos".into(),
            quantity: 12,
            min_stock: 5,
            unit_price: 3.5,
            expires_on: Some("2030-01-31".into()),
            lot: None,
            supplier: None,
        })
        .unwrap();
        core
    }

    #[test]
    fn test_suggest_diagnoses_round_trip() {
        let core = core();
        let report = core
            .suggest_diagnoses(vec!["vomito".into(), "diarrea".into()], Some("Perro".into()), None, true)
            .unwrap();

        assert_eq!(report.status, "matches");
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].percentage, 100.0);
        assert_eq!(report.results[0].medications[0].stock_state, "in_stock");
    }

    #[test]
    fn test_empty_query_is_invalid_input() {
        let core = core();
        let result = core.suggest_diagnoses(vec![" ".into()], None, None, false);
        assert!(matches!(result, Err(VetTriageError::InvalidInput(_))));
    }

    #[test]
    fn test_adjust_stock_errors_map() {
        let core = core();
        assert_eq!(core.adjust_stock("SU-1".into(), -2, "venta".into()).unwrap(), 10);
        assert!(matches!(
            core.adjust_stock("SU-1".into(), -50, "venta".into()),
            Err(VetTriageError::InvalidInput(_))
        ));
        assert!(matches!(
            core.adjust_stock("nope".into(), 1, "compra".into()),
            Err(VetTriageError::NotFound(_))
        ));
    }

    #[test]
    fn test_bad_expiry_date_rejected() {
        let core = core();
        let mut item: FfiInventoryItem = core.get_inventory_item("SU-1".into()).unwrap().unwrap();
        assert_eq!(item.expires_on.as_deref(), Some("2030-01-31"));

        item.expires_on = Some("31/01/2030".into());
        assert!(matches!(
            core.upsert_inventory_item(item),
            Err(VetTriageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_medications_for_unknown_condition() {
        let core = core();
        assert_eq!(core.medications_for_condition("gastro".into()).unwrap().len(), 1);
        assert!(matches!(
            core.medications_for_condition("Moquillo".into()),
            Err(VetTriageError::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.db").to_string_lossy().to_string();
        let result = open_database_with_config(path, r#"{"ranking": {"default_limit": 0}}"#.into());
        assert!(matches!(result, Err(VetTriageError::ConfigError(_))));
    }

    #[test]
    fn test_triage_is_available_without_catalog() {
        let core = open_database_in_memory().unwrap();
        let triage = core.triage(vec!["no orina".into()]);
        assert_eq!(triage.urgency, "critical");
    }
}
