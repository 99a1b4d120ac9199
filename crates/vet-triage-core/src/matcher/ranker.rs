//! Condition ranking: percentage, threshold, sort, truncate.

use std::cmp::Ordering;

use crate::config::RankingConfig;
use crate::models::{Condition, MatchResult};

use super::aggregator::aggregate;
use super::normalizer::normalize;
use super::scorer::SymptomScorer;
use super::{EngineResult, MatchError};

/// Slack for comparing percentages against thresholds.
///
/// A plain `percentage >= threshold` drops conditions that sit exactly on the
/// bar: seven symptoms scoring 0.6, 0.6, 0.6 and 0.3 come out as
/// 29.999999999999993% and would miss the 30% threshold.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Ranks catalog conditions against a symptom query.
pub struct ConditionRanker<'a> {
    scorer: &'a SymptomScorer,
    config: &'a RankingConfig,
}

impl<'a> ConditionRanker<'a> {
    pub fn new(scorer: &'a SymptomScorer, config: &'a RankingConfig) -> Self {
        Self { scorer, config }
    }

    /// Rank conditions for normalized, non-empty query symptoms.
    ///
    /// Results are sorted by percentage then match count, both descending;
    /// conditions that tie keep their catalog order.
    pub fn rank(
        &self,
        symptoms: &[String],
        species: Option<&str>,
        conditions: &[Condition],
        limit: usize,
    ) -> EngineResult<Vec<MatchResult>> {
        if symptoms.is_empty() {
            return Err(MatchError::InvalidInput(
                "at least one symptom is required".into(),
            ));
        }

        let species = species.map(normalize).filter(|s| !s.is_empty());
        let threshold = self.config.threshold_for(symptoms.len());

        let mut results: Vec<MatchResult> = conditions
            .iter()
            .filter(|c| match &species {
                Some(s) => c.affects_species(s),
                None => true,
            })
            .filter_map(|condition| {
                let evidence = aggregate(self.scorer, symptoms, &condition.symptoms);
                let raw = evidence.total_score / symptoms.len() as f64 * 100.0;

                if raw + THRESHOLD_EPSILON < threshold || evidence.matched.is_empty() {
                    return None;
                }

                Some(MatchResult {
                    condition: condition.summary(),
                    match_count: evidence.matched.len(),
                    matched_symptoms: evidence.matched,
                    condition_symptom_count: condition.symptoms.len(),
                    query_symptom_count: symptoms.len(),
                    percentage: round_one_decimal(raw),
                    medications: Vec::new(),
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(Ordering::Equal)
                .then(b.match_count.cmp(&a.match_count))
        });
        results.truncate(limit);

        Ok(results)
    }
}

/// Round to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
