//! Symptom query and diagnosis suggestion models.

use serde::{Deserialize, Serialize};

use super::{ConditionSummary, MedicationSuggestion};

/// A caller-supplied list of reported symptoms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomQuery {
    /// Raw symptoms, in the order reported
    pub symptoms: Vec<String>,
    /// Restrict candidates to conditions affecting this species
    pub species: Option<String>,
    /// Maximum number of results (engine default when None)
    pub limit: Option<usize>,
    /// Attach stock-aware medication suggestions to each result
    pub include_medications: bool,
}

impl SymptomQuery {
    /// Create a query over the given symptoms with no species filter.
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            species: None,
            limit: None,
            include_medications: false,
        }
    }

    pub fn for_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_medications(mut self) -> Self {
        self.include_medications = true;
        self
    }

    /// Symptoms that carry text, in their original order.
    pub fn effective_symptoms(&self) -> Vec<&str> {
        self.symptoms
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}

/// One ranked condition for a symptom query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub condition: ConditionSummary,
    /// Number of distinct catalog symptoms matched
    pub match_count: usize,
    /// Matched catalog symptoms, in catalog casing, first-match order
    pub matched_symptoms: Vec<String>,
    /// Symptoms listed for the condition
    pub condition_symptom_count: usize,
    /// Symptoms in the query (the percentage denominator)
    pub query_symptom_count: usize,
    /// Match percentage, one decimal
    pub percentage: f64,
    /// Stock-aware medication suggestions (empty unless requested)
    #[serde(default)]
    pub medications: Vec<MedicationSuggestion>,
}

/// Whether a query produced any suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum DiagnosisOutcome {
    /// Ranked matches, best first
    Matches(Vec<MatchResult>),
    /// Nothing cleared the threshold
    NoMatch,
}

/// A query symptom that matched nothing in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnmatchedSymptom {
    pub symptom: String,
    /// Closest known catalog symptom, if one is close enough to be a typo
    pub closest_known: Option<String>,
}

/// A condition found by name, with the medications stocked for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionLookup {
    pub condition: ConditionSummary,
    pub symptoms: Vec<String>,
    pub medications: Vec<MedicationSuggestion>,
}

/// Full response to a symptom query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisReport {
    pub report_id: String,
    pub generated_at: String,
    /// Symptoms as supplied by the caller
    pub symptoms: Vec<String>,
    pub species: Option<String>,
    pub outcome: DiagnosisOutcome,
    pub unmatched: Vec<UnmatchedSymptom>,
    /// SHA-256 of the catalog snapshot the report was computed against
    pub catalog_fingerprint: String,
}

impl DiagnosisReport {
    /// Ranked results (empty on no match).
    pub fn results(&self) -> &[MatchResult] {
        match &self.outcome {
            DiagnosisOutcome::Matches(results) => results,
            DiagnosisOutcome::NoMatch => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self.outcome, DiagnosisOutcome::Matches(_))
    }

    /// Caller-facing message for the outcome.
    pub fn message(&self) -> &'static str {
        match self.outcome {
            DiagnosisOutcome::Matches(_) => {
                "Suggestions only. A veterinarian must confirm any diagnosis."
            }
            DiagnosisOutcome::NoMatch => "No diagnoses found for the reported symptoms.",
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: DiagnosisOutcome) -> DiagnosisReport {
        DiagnosisReport {
            report_id: "r-1".into(),
            generated_at: "2026-01-01T00:00:00Z".into(),
            symptoms: vec!["vomito".into()],
            species: None,
            outcome,
            unmatched: vec![],
            catalog_fingerprint: String::new(),
        }
    }

    #[test]
    fn test_effective_symptoms_skip_blank() {
        let query = SymptomQuery::new(["vomito", "  ", "", "fiebre"]);
        assert_eq!(query.effective_symptoms(), vec!["vomito", "fiebre"]);
    }

    #[test]
    fn test_builder() {
        let query = SymptomQuery::new(["tos"])
            .for_species("gato")
            .with_limit(3)
            .with_medications();
        assert_eq!(query.species.as_deref(), Some("gato"));
        assert_eq!(query.limit, Some(3));
        assert!(query.include_medications);
    }

    #[test]
    fn test_no_match_is_distinct() {
        let empty = report(DiagnosisOutcome::NoMatch);
        assert!(!empty.is_match());
        assert!(empty.results().is_empty());
        assert!(empty.message().starts_with("No diagnoses found"));
    }

    #[test]
    fn test_no_match_serializes_with_status() {
        let json = report(DiagnosisOutcome::NoMatch).to_json().unwrap();
        assert!(json.contains("\"status\": \"no_match\""));
    }
}
