//! Declarative clinical lookup tables.
//!
//! Triage keywords, exam panels and diet guides live in `data/*.json` as
//! ordered `[keyword, value]` pairs. Keys are normalized on load so lookups
//! compare normalized text on both sides.

mod diet;
mod exams;
mod triage;

pub use diet::*;
pub use exams::*;
pub use triage::*;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::matcher::{normalize, words};

const BUILTIN_TRIAGE: &str = include_str!("../../data/triage.json");
const BUILTIN_EXAMS: &str = include_str!("../../data/exams.json");
const BUILTIN_DIET: &str = include_str!("../../data/diet.json");

/// Knowledge base errors.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Malformed knowledge table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Ordered keyword table with normalized keys.
///
/// Order is significant: every `first_*` lookup returns the earliest entry
/// that qualifies.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for KeywordMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for KeywordMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<(String, V)>::deserialize(deserializer).map(Self::from_pairs)
    }
}

impl<V> KeywordMap<V> {
    /// Build from `(keyword, value)` pairs; blank keywords are dropped.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (normalize(key.as_ref()), value))
                .filter(|(key, _)| !key.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Exact lookup by normalized key.
    pub fn get(&self, key: &str) -> Option<&V> {
        let key = normalize(key);
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Every entry whose keyword occurs inside `text` (normalized).
    pub fn all_contained_in(&self, text: &str) -> Vec<(&str, &V)> {
        self.iter().filter(|(k, _)| text.contains(k)).collect()
    }

    /// First entry whose keyword occurs inside `text` (normalized).
    pub fn first_contained_in(&self, text: &str) -> Option<(&str, &V)> {
        self.iter().find(|(k, _)| text.contains(k))
    }

    /// First entry where the keyword contains `text` or `text` contains it.
    pub fn first_overlapping(&self, text: &str) -> Option<(&str, &V)> {
        if text.is_empty() {
            return None;
        }
        self.iter()
            .find(|(k, _)| text.contains(k) || k.contains(text))
    }

    /// First entry sharing at least one whole word with `text` (normalized).
    pub fn first_sharing_word(&self, text: &str) -> Option<(&str, &V)> {
        self.iter()
            .find(|(k, _)| words(k).any(|kw| words(text).any(|tw| tw == kw)))
    }
}

/// Built-in and user-supplied lookup tables.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub triage: TriageRules,
    pub exams: ExamGuide,
    pub diet: DietGuide,
}

impl KnowledgeBase {
    /// Tables bundled with the crate.
    pub fn builtin() -> KnowledgeResult<Self> {
        Self::from_json(BUILTIN_TRIAGE, BUILTIN_EXAMS, BUILTIN_DIET)
    }

    /// Parse the three tables from their JSON documents.
    pub fn from_json(triage: &str, exams: &str, diet: &str) -> KnowledgeResult<Self> {
        let kb = Self {
            triage: serde_json::from_str(triage)?,
            exams: serde_json::from_str(exams)?,
            diet: serde_json::from_str(diet)?,
        };

        tracing::debug!(
            triage_keywords = kb.triage.len(),
            exam_keywords = kb.exams.by_condition.len(),
            diet_keywords = kb.diet.condition_categories.len(),
            "knowledge base loaded"
        );

        Ok(kb)
    }
}
