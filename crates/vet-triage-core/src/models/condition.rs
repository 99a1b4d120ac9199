//! Diagnosis catalog models.

use serde::{Deserialize, Serialize};

use crate::matcher::normalize;

/// A diagnosable condition in the reference catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    /// Stable catalog identifier
    pub id: u32,
    /// Display name (e.g., "Gastroenteritis")
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Severity label as written by the clinic (e.g., "moderada")
    #[serde(default)]
    pub severity: String,
    /// Urgency label as written by the clinic (e.g., "alta")
    #[serde(default)]
    pub urgency: String,
    /// Canonical symptoms, in catalog order (order is significant for tie-breaks)
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Affected species (e.g., ["perro", "gato"])
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub prevention: String,
    /// Free-text medication names associated with this condition
    #[serde(default)]
    pub medications: Vec<String>,
}

impl Condition {
    /// Create a new condition with required fields.
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            severity: String::new(),
            urgency: String::new(),
            symptoms: Vec::new(),
            species: Vec::new(),
            treatment: String::new(),
            prevention: String::new(),
            medications: Vec::new(),
        }
    }

    /// Check if this condition affects a given species.
    ///
    /// Unlike inventory items, an empty species list matches nothing: the
    /// catalog always lists affected species explicitly.
    pub fn affects_species(&self, species: &str) -> bool {
        let wanted = normalize(species);
        self.species.iter().any(|s| normalize(s) == wanted)
    }

    /// Species check that also accepts the plural form stored in the catalog
    /// (e.g., "perro" against "perros").
    pub fn affects_species_loosely(&self, species: &str) -> bool {
        let wanted = normalize(species);
        let plural = format!("{}s", wanted);
        self.species.iter().any(|s| {
            let s = normalize(s);
            s == wanted || s == plural
        })
    }

    /// Summary used in match results.
    pub fn summary(&self) -> ConditionSummary {
        ConditionSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            severity: self.severity.clone(),
            urgency: self.urgency.clone(),
            treatment: self.treatment.clone(),
            prevention: self.prevention.clone(),
            species: self.species.clone(),
        }
    }
}

/// The condition fields echoed back with every match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionSummary {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub severity: String,
    pub urgency: String,
    pub treatment: String,
    pub prevention: String,
    /// Affected species
    pub species: Vec<String>,
}
