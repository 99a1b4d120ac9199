//! Best-match aggregation of a query against one condition's symptoms.

use super::normalizer::normalize;
use super::scorer::SymptomScorer;

/// Accumulated evidence for one condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    /// Sum of the best score of every input symptom
    pub total_score: f64,
    /// Winning catalog symptoms, catalog casing, deduplicated, first-match order
    pub matched: Vec<String>,
}

/// Aggregate normalized input symptoms against raw catalog symptoms.
///
/// For every input the highest-scoring catalog symptom wins; ties keep the
/// earliest catalog entry.
pub fn aggregate(scorer: &SymptomScorer, inputs: &[String], catalog: &[String]) -> Aggregate {
    let catalog_norm: Vec<String> = catalog.iter().map(|s| normalize(s)).collect();
    let mut result = Aggregate::default();

    for input in inputs {
        let mut best_score = 0.0;
        let mut best_idx = None;

        for (idx, candidate) in catalog_norm.iter().enumerate() {
            let score = scorer.score(input, candidate);
            if score > best_score {
                best_score = score;
                best_idx = Some(idx);
            }
        }

        if let Some(idx) = best_idx {
            result.total_score += best_score;
            let winner = &catalog[idx];
            if !result.matched.contains(winner) {
                result.matched.push(winner.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn normalized(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| normalize(s)).collect()
    }

    #[test]
    fn test_sums_best_scores() {
        let scorer = SymptomScorer::default();
        let catalog = strings(&["Vómito", "Diarrea con sangre", "Fiebre"]);
        let result = aggregate(&scorer, &normalized(&["vomito", "diarrea"]), &catalog);

        assert!((result.total_score - 1.9).abs() < 1e-9);
        assert_eq!(result.matched, strings(&["Vómito", "Diarrea con sangre"]));
    }

    #[test]
    fn test_tie_keeps_first_catalog_entry() {
        let scorer = SymptomScorer::default();
        let catalog = strings(&["Tos seca", "Tos con flema"]);
        let result = aggregate(&scorer, &normalized(&["tos"]), &catalog);

        assert!((result.total_score - 0.9).abs() < 1e-9);
        assert_eq!(result.matched, strings(&["Tos seca"]));
    }

    #[test]
    fn test_deduplicates_matched_symptoms() {
        let scorer = SymptomScorer::default();
        let catalog = strings(&["Diarrea con sangre", "Fiebre"]);
        let result = aggregate(&scorer, &normalized(&["diarrea", "con sangre"]), &catalog);

        assert!((result.total_score - 1.8).abs() < 1e-9);
        assert_eq!(result.matched, strings(&["Diarrea con sangre"]));
    }

    #[test]
    fn test_no_symptoms_no_evidence() {
        let scorer = SymptomScorer::default();
        let result = aggregate(&scorer, &normalized(&["vomito"]), &[]);

        assert_eq!(result.total_score, 0.0);
        assert!(result.matched.is_empty());
    }
}
