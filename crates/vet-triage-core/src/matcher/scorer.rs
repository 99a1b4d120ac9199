//! Symptom pair scoring.
//!
//! Rules, first match wins:
//! 1. Exact equality → `exact`
//! 2. Input contained in catalog symptom → `input_in_catalog`
//! 3. Catalog symptom contained in input → `catalog_in_input`
//! 4. Word overlap without stop words:
//!    ≥2 words → `multi_word`, one long word → `single_word`, else 0

use std::collections::HashSet;

use crate::config::{ScoreScale, ScoringConfig};

use super::normalizer::{normalize, words};

/// Which rule matched a symptom pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    InputInCatalog,
    CatalogInInput,
    MultiWord,
    SingleWord,
    None,
}

/// Scores one input symptom against one catalog symptom.
#[derive(Debug, Clone)]
pub struct SymptomScorer {
    scale: ScoreScale,
    stop_words: HashSet<String>,
    min_single_word_len: usize,
}

impl Default for SymptomScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl SymptomScorer {
    /// Create a scorer from configuration.
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            scale: config.scale.clone(),
            stop_words: config.stop_words.iter().map(|w| normalize(w)).collect(),
            min_single_word_len: config.min_single_word_len,
        }
    }

    pub fn scale(&self) -> &ScoreScale {
        &self.scale
    }

    /// Classify a pair of already-normalized symptoms.
    pub fn classify(&self, input: &str, catalog: &str) -> MatchKind {
        // An empty catalog symptom would otherwise be "contained" in everything.
        if input.is_empty() || catalog.is_empty() {
            return MatchKind::None;
        }

        if input == catalog {
            return MatchKind::Exact;
        }
        if catalog.contains(input) {
            return MatchKind::InputInCatalog;
        }
        if input.contains(catalog) {
            return MatchKind::CatalogInInput;
        }

        let input_words: HashSet<&str> = words(input)
            .filter(|w| !self.stop_words.contains(*w))
            .collect();
        let common: Vec<&str> = words(catalog)
            .filter(|w| input_words.contains(w))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        match common.as_slice() {
            [] => MatchKind::None,
            [word] if word.chars().count() > self.min_single_word_len => MatchKind::SingleWord,
            [_] => MatchKind::None,
            _ => MatchKind::MultiWord,
        }
    }

    /// Score for a match kind.
    pub fn value(&self, kind: MatchKind) -> f64 {
        match kind {
            MatchKind::Exact => self.scale.exact,
            MatchKind::InputInCatalog => self.scale.input_in_catalog,
            MatchKind::CatalogInInput => self.scale.catalog_in_input,
            MatchKind::MultiWord => self.scale.multi_word,
            MatchKind::SingleWord => self.scale.single_word,
            MatchKind::None => 0.0,
        }
    }

    /// Score a pair of already-normalized symptoms.
    pub fn score(&self, input: &str, catalog: &str) -> f64 {
        self.value(self.classify(input, catalog))
    }

    /// Score a pair of raw symptoms, normalizing both.
    pub fn score_raw(&self, input: &str, catalog: &str) -> f64 {
        self.score(&normalize(input), &normalize(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_after_normalization() {
        let scorer = SymptomScorer::default();
        assert_eq!(scorer.score_raw("vomito", "Vómito"), 1.0);
    }

    #[test]
    fn test_input_in_catalog() {
        let scorer = SymptomScorer::default();
        assert_eq!(scorer.score_raw("diarrea", "Diarrea con sangre"), 0.9);
    }

    #[test]
    fn test_catalog_in_input() {
        let scorer = SymptomScorer::default();
        assert_eq!(scorer.score_raw("fiebre muy alta", "Fiebre"), 0.85);
    }

    #[test]
    fn test_multi_word_overlap() {
        let scorer = SymptomScorer::default();
        // "perdida" and "peso" shared; "de" is a stop word
        assert_eq!(
            scorer.classify("perdida rapida de peso", "perdida de peso progresiva"),
            MatchKind::MultiWord
        );
        assert_eq!(scorer.score("perdida rapida de peso", "perdida de peso progresiva"), 0.6);
    }

    #[test]
    fn test_single_long_word() {
        let scorer = SymptomScorer::default();
        assert_eq!(
            scorer.classify("secrecion nasal", "secrecion ocular"),
            MatchKind::SingleWord
        );
        assert_eq!(scorer.score("secrecion nasal", "secrecion ocular"), 0.3);
    }

    #[test]
    fn test_single_short_word_is_not_signal() {
        let scorer = SymptomScorer::default();
        // "tos" has 3 characters, below the floor
        assert_eq!(scorer.score("tos con flema", "tos seca"), 0.0);
        // exactly at the floor is still not enough
        assert_eq!(scorer.score("pelo opaco", "caida pelo"), 0.0);
    }

    #[test]
    fn test_stop_words_ignored() {
        let scorer = SymptomScorer::default();
        assert_eq!(scorer.score("sangre en la orina", "pus en la herida"), 0.0);
    }

    #[test]
    fn test_empty_catalog_symptom_never_matches() {
        let scorer = SymptomScorer::default();
        assert_eq!(scorer.score("vomito", ""), 0.0);
    }

    #[test]
    fn test_rule_priority() {
        let scorer = SymptomScorer::default();
        // substring wins over word overlap
        assert_eq!(scorer.classify("tos seca persistente", "tos"), MatchKind::CatalogInInput);
    }

    #[test]
    fn test_custom_scale() {
        let mut config = ScoringConfig::default();
        config.scale.input_in_catalog = 0.8;
        config.min_single_word_len = 2;
        let scorer = SymptomScorer::new(&config);

        assert_eq!(scorer.score("diarrea", "diarrea con sangre"), 0.8);
        assert_eq!(scorer.score("tos con flema", "tos seca"), 0.3);
    }
}
