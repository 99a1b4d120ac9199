//! Engine configuration.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration for the diagnosis engine and its collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub linking: LinkingConfig,
    pub inventory: InventoryConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> ConfigResult<()> {
        self.scoring.scale.validate()?;
        self.ranking.validate()?;
        Ok(())
    }
}

/// Discrete score assigned to each symptom-pair rule, highest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreScale {
    /// Equal after normalization
    pub exact: f64,
    /// Input symptom is a substring of the catalog symptom
    pub input_in_catalog: f64,
    /// Catalog symptom is a substring of the input symptom
    pub catalog_in_input: f64,
    /// Two or more significant words in common
    pub multi_word: f64,
    /// Exactly one long significant word in common
    pub single_word: f64,
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            exact: 1.0,
            input_in_catalog: 0.9,
            catalog_in_input: 0.85,
            multi_word: 0.6,
            single_word: 0.3,
        }
    }
}

impl ScoreScale {
    /// Highest score a single symptom can contribute.
    pub fn max(&self) -> f64 {
        self.exact
    }

    fn validate(&self) -> ConfigResult<()> {
        let steps = [
            ("exact", self.exact),
            ("input_in_catalog", self.input_in_catalog),
            ("catalog_in_input", self.catalog_in_input),
            ("multi_word", self.multi_word),
            ("single_word", self.single_word),
        ];

        for (name, value) in steps {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "score '{}' must be in (0, 1], got {}",
                    name, value
                )));
            }
        }

        for pair in steps.windows(2) {
            if pair[0].1 < pair[1].1 {
                return Err(ConfigError::Invalid(format!(
                    "score '{}' ({}) must not be lower than '{}' ({})",
                    pair[0].0, pair[0].1, pair[1].0, pair[1].1
                )));
            }
        }

        Ok(())
    }
}

/// Symptom-pair scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub scale: ScoreScale,
    /// Connective words ignored by word-overlap scoring
    pub stop_words: Vec<String>,
    /// A lone common word must be longer than this to count
    pub min_single_word_len: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scale: ScoreScale::default(),
            stop_words: ["de", "la", "el", "en", "los", "las", "un", "una", "por", "con", "del"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            min_single_word_len: 4,
        }
    }
}

/// Threshold and truncation policy for ranked conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    pub default_limit: usize,
    /// Queries with at most this many symptoms use the lenient threshold
    pub small_query_max: usize,
    /// Minimum percentage for small queries
    pub small_query_threshold: f64,
    /// Minimum percentage for larger queries
    pub threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            small_query_max: 2,
            small_query_threshold: 25.0,
            threshold: 30.0,
        }
    }
}

impl RankingConfig {
    /// Minimum percentage required for a query of the given size.
    pub fn threshold_for(&self, query_len: usize) -> f64 {
        if query_len <= self.small_query_max {
            self.small_query_threshold
        } else {
            self.threshold
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.default_limit == 0 {
            return Err(ConfigError::Invalid("default_limit must be at least 1".into()));
        }
        for value in [self.small_query_threshold, self.threshold] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "thresholds must be within 0-100, got {}",
                    value
                )));
            }
        }
        Ok(())
    }
}

/// Diagnosis-to-medication linking settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkingConfig {
    /// Inventory categories that are never recommended as medication
    pub excluded_categories: Vec<String>,
    /// Hint words must be longer than this to match on their own
    pub min_token_len: usize,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            excluded_categories: [
                "Insumos",
                "Consultas",
                "Cirugías",
                "Exámenes",
                "Hospital",
                "Procedimientos",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            min_token_len: 3,
        }
    }
}

/// Inventory search and alert settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    /// Categories without physical stock (skipped by stock alerts)
    pub service_categories: Vec<String>,
    /// Category holding exam services
    pub exam_category: String,
    /// Products expiring within this many days raise an alert
    pub expiry_window_days: i64,
    /// Maximum number of inventory search results
    pub search_limit: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            service_categories: [
                "Consultas",
                "Exámenes",
                "Procedimientos",
                "Cirugías",
                "Hospital",
                "Servicios Extra",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            exam_category: "Exámenes".to_string(),
            expiry_window_days: 60,
            search_limit: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json(r#"{"ranking": {"default_limit": 3}}"#).unwrap();
        assert_eq!(config.ranking.default_limit, 3);
        assert_eq!(config.ranking.threshold, 30.0);
        assert_eq!(config.scoring.scale.input_in_catalog, 0.9);
        assert_eq!(config.scoring.min_single_word_len, 4);
    }

    #[test]
    fn test_threshold_by_query_size() {
        let ranking = RankingConfig::default();
        assert_eq!(ranking.threshold_for(1), 25.0);
        assert_eq!(ranking.threshold_for(2), 25.0);
        assert_eq!(ranking.threshold_for(3), 30.0);
    }

    #[test]
    fn test_rejects_unordered_scale() {
        let result = EngineConfig::from_json(
            r#"{"scoring": {"scale": {"input_in_catalog": 0.8, "catalog_in_input": 0.95}}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let result = EngineConfig::from_json(r#"{"ranking": {"default_limit": 0}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            EngineConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
