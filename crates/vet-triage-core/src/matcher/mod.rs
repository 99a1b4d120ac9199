//! Symptom matcher and diagnosis suggestion engine.
//!
//! Pipeline: Normalization → Pair Scoring → Aggregation → Ranking → Medication Linking

mod aggregator;
mod linker;
mod normalizer;
mod ranker;
mod scorer;
mod vocabulary;

pub use aggregator::*;
pub use linker::*;
pub use normalizer::*;
pub use ranker::*;
pub use scorer::*;
pub use vocabulary::*;

use thiserror::Error;

use crate::catalog::CatalogSnapshot;
use crate::config::EngineConfig;
use crate::models::{
    ConditionLookup, DiagnosisOutcome, DiagnosisReport, MedicationSuggestion, SymptomQuery,
    UnmatchedSymptom,
};

/// Matcher errors.
#[derive(Error, Debug, PartialEq)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type EngineResult<T> = Result<T, MatchError>;

/// Main engine that coordinates the full pipeline.
pub struct DiagnosisEngine {
    config: EngineConfig,
    scorer: SymptomScorer,
    linker: MedicationLinker,
}

impl Default for DiagnosisEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DiagnosisEngine {
    /// Create an engine from configuration.
    pub fn new(config: EngineConfig) -> Self {
        let scorer = SymptomScorer::new(&config.scoring);
        let linker = MedicationLinker::new(&config.linking);
        Self {
            config,
            scorer,
            linker,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &SymptomScorer {
        &self.scorer
    }

    pub fn linker(&self) -> &MedicationLinker {
        &self.linker
    }

    /// Suggest conditions for a symptom query.
    ///
    /// Fails on an empty query or a zero limit; a query that matches nothing
    /// yields a report whose outcome is [`DiagnosisOutcome::NoMatch`].
    pub fn suggest(
        &self,
        query: &SymptomQuery,
        catalog: &CatalogSnapshot,
    ) -> EngineResult<DiagnosisReport> {
        // Step 1: Normalize the query
        let symptoms: Vec<String> = query
            .effective_symptoms()
            .into_iter()
            .map(normalize)
            .collect();

        if symptoms.is_empty() {
            return Err(MatchError::InvalidInput(
                "at least one symptom is required".into(),
            ));
        }

        tracing::debug!(
            symptoms = symptoms.len(),
            species = ?query.species,
            conditions = catalog.conditions.len(),
            "ranking conditions"
        );

        if query.limit == Some(0) {
            return Err(MatchError::InvalidInput("limit must be at least 1".into()));
        }

        // Step 2: Score, aggregate and rank
        let limit = query.limit.unwrap_or(self.config.ranking.default_limit);
        let ranker = ConditionRanker::new(&self.scorer, &self.config.ranking);
        let mut results = ranker.rank(
            &symptoms,
            query.species.as_deref(),
            &catalog.conditions,
            limit,
        )?;

        // Step 3: Attach medications to the survivors
        if query.include_medications {
            for result in &mut results {
                result.medications = self.medications_for(&result.condition.name, catalog);
            }
        }

        let unmatched = self.unmatched_symptoms(&symptoms, catalog);

        tracing::info!(
            results = results.len(),
            unmatched = unmatched.len(),
            "diagnosis suggestion complete"
        );

        let outcome = if results.is_empty() {
            DiagnosisOutcome::NoMatch
        } else {
            DiagnosisOutcome::Matches(results)
        };

        Ok(DiagnosisReport {
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            symptoms: query.symptoms.clone(),
            species: query.species.clone(),
            outcome,
            unmatched,
            catalog_fingerprint: catalog.fingerprint(),
        })
    }

    /// Stock-aware medication suggestions for a condition by name.
    pub fn medications_for(
        &self,
        condition_name: &str,
        catalog: &CatalogSnapshot,
    ) -> Vec<MedicationSuggestion> {
        let hints = catalog.hints_for(condition_name);
        self.linker.link(&hints, &catalog.inventory)
    }

    /// A condition by name with its stock-aware medications.
    pub fn lookup_condition(&self, name: &str, catalog: &CatalogSnapshot) -> Option<ConditionLookup> {
        catalog.find_condition(name).map(|condition| ConditionLookup {
            condition: condition.summary(),
            symptoms: condition.symptoms.clone(),
            medications: self.medications_for(&condition.name, catalog),
        })
    }

    /// Conditions whose name contains the query, each with its medications.
    pub fn search_conditions(
        &self,
        query: &str,
        species: Option<&str>,
        catalog: &CatalogSnapshot,
    ) -> Vec<ConditionLookup> {
        catalog
            .search_conditions(query, species)
            .into_iter()
            .map(|condition| ConditionLookup {
                condition: condition.summary(),
                symptoms: condition.symptoms.clone(),
                medications: self.medications_for(&condition.name, catalog),
            })
            .collect()
    }

    /// Normalized query symptoms that score zero against every catalog symptom.
    fn unmatched_symptoms(
        &self,
        symptoms: &[String],
        catalog: &CatalogSnapshot,
    ) -> Vec<UnmatchedSymptom> {
        let vocabulary = SymptomVocabulary::from_conditions(&catalog.conditions);
        let known: Vec<String> = vocabulary.symptoms().iter().map(|s| normalize(s)).collect();

        symptoms
            .iter()
            .filter(|s| known.iter().all(|k| self.scorer.score(s, k) == 0.0))
            .map(|s| UnmatchedSymptom {
                symptom: s.clone(),
                closest_known: vocabulary.closest(s),
            })
            .collect()
    }
}
