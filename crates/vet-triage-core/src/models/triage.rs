//! Preliminary triage and follow-up recommendation models.

use serde::{Deserialize, Serialize};

/// Urgency of a preliminary triage, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Nothing reported yet; needs an in-person evaluation
    Pending,
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Pending => "pending",
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

/// Orientative assessment produced before the vet sees the patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageAssessment {
    pub possible_conditions: Vec<String>,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
    /// Symptoms as reported
    pub symptoms: Vec<String>,
    pub note: String,
}

/// An exam service from the inventory suggested for a condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamSuggestion {
    pub sku: String,
    pub name: String,
    pub price: f64,
    /// Exam keyword that matched, or "basic" for the fallback panel
    pub exam_kind: String,
}

/// Whether a diet recommendation is therapeutic or a regular food.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietKind {
    Regular,
    Therapeutic,
}

/// A single recommended food.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietRecommendation {
    pub name: String,
    pub kind: DietKind,
    /// Why it is recommended (therapeutic category or product description)
    pub indication: String,
    pub requires_prescription: bool,
}

/// Store availability of a recommended food.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreAvailability {
    pub sku: String,
    pub name: String,
    pub available: bool,
    pub price: f64,
}

/// Diet recommendations for one patient profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietPlan {
    pub species: String,
    pub life_stage: String,
    pub medical_condition: Option<String>,
    pub kind: DietKind,
    pub recommendations: Vec<DietRecommendation>,
    pub availability: Vec<StoreAvailability>,
}
