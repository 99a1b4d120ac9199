//! Keyword-driven preliminary triage.

use serde::{Deserialize, Serialize};

use crate::matcher::normalize;
use crate::models::{TriageAssessment, Urgency};

use super::KeywordMap;

/// Maximum conditions and recommendations listed in an assessment.
const MAX_TRIAGE_ITEMS: usize = 5;

const NOTE_NO_SYMPTOMS: &str = "Sin síntomas reportados - requiere evaluación presencial";
const NOTE_PRELIMINARY: &str =
    "Diagnóstico preliminar automático - Requiere confirmación veterinaria";
const GENERAL_EVALUATION: &str = "Evaluación general requerida";

/// What a triage keyword suggests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageRule {
    pub condition: String,
    pub urgency: Urgency,
    pub action: String,
}

/// Ordered keyword → rule table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TriageRules(KeywordMap<TriageRule>);

impl TriageRules {
    pub fn new(rules: KeywordMap<TriageRule>) -> Self {
        Self(rules)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assess reported symptoms against every keyword.
    ///
    /// Symptoms are joined into one normalized text, so keywords spanning two
    /// reported symptoms can still fire. Conditions and actions keep table
    /// order and are listed once.
    pub fn assess(&self, symptoms: &[String]) -> TriageAssessment {
        let reported: Vec<String> = symptoms
            .iter()
            .map(|s| normalize(s))
            .filter(|s| !s.is_empty())
            .collect();

        if reported.is_empty() {
            return TriageAssessment {
                possible_conditions: Vec::new(),
                urgency: Urgency::Pending,
                recommendations: vec![GENERAL_EVALUATION.to_string()],
                symptoms: symptoms.to_vec(),
                note: NOTE_NO_SYMPTOMS.to_string(),
            };
        }

        let text = reported.join(" ");
        let mut urgency = Urgency::Low;
        let mut conditions: Vec<String> = Vec::new();
        let mut actions: Vec<String> = Vec::new();

        for (keyword, rule) in self.0.all_contained_in(&text) {
            tracing::trace!(keyword, urgency = rule.urgency.as_str(), "triage keyword hit");

            urgency = urgency.max(rule.urgency);
            if !conditions.contains(&rule.condition) {
                conditions.push(rule.condition.clone());
            }
            if !actions.contains(&rule.action) {
                actions.push(rule.action.clone());
            }
        }

        conditions.truncate(MAX_TRIAGE_ITEMS);
        actions.truncate(MAX_TRIAGE_ITEMS);

        tracing::debug!(
            urgency = urgency.as_str(),
            conditions = conditions.len(),
            "preliminary triage"
        );

        TriageAssessment {
            possible_conditions: conditions,
            urgency,
            recommendations: actions,
            symptoms: symptoms.to_vec(),
            note: NOTE_PRELIMINARY.to_string(),
        }
    }
}
