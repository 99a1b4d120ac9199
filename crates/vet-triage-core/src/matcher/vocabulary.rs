//! Known-symptom vocabulary: listing, autocomplete and typo hints.

use std::collections::BTreeSet;

use strsim::jaro_winkler;

use crate::models::Condition;

use super::normalizer::{normalize, words};

/// Queries shorter than this return no suggestions.
const MIN_QUERY_CHARS: usize = 2;

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const CLOSEST_MIN_SIMILARITY: f64 = 0.85;

/// Unique symptoms across a condition catalog.
#[derive(Debug, Clone, Default)]
pub struct SymptomVocabulary {
    /// (original, normalized), sorted by original text
    entries: Vec<(String, String)>,
}

impl SymptomVocabulary {
    /// Collect every distinct symptom string in the catalog.
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        let unique: BTreeSet<&str> = conditions
            .iter()
            .flat_map(|c| c.symptoms.iter())
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect();

        Self {
            entries: unique
                .into_iter()
                .map(|s| (s.to_string(), normalize(s)))
                .collect(),
        }
    }

    /// All symptoms, sorted.
    pub fn symptoms(&self) -> Vec<String> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Autocomplete: symptoms containing the query, best first.
    ///
    /// Symptoms starting with the query rank first, then symptoms with a word
    /// starting with it, then any other containment; ties are alphabetical.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let query = normalize(query);
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let mut hits: Vec<(u8, String, &str)> = self
            .entries
            .iter()
            .filter(|(_, norm)| norm.contains(&query))
            .map(|(original, norm)| {
                let relevance = if norm.starts_with(&query) {
                    2
                } else if words(norm).any(|w| w.starts_with(&query)) {
                    1
                } else {
                    0
                };
                (relevance, original.to_lowercase(), original.as_str())
            })
            .collect();

        hits.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        hits.into_iter()
            .take(limit)
            .map(|(_, _, original)| original.to_string())
            .collect()
    }

    /// Closest known symptom to a normalized input, if similar enough.
    pub fn closest(&self, symptom: &str) -> Option<String> {
        self.entries
            .iter()
            .map(|(original, norm)| (original, jaro_winkler(symptom, norm)))
            .filter(|(_, similarity)| *similarity >= CLOSEST_MIN_SIMILARITY)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(original, _)| original.clone())
    }
}
