//! In-memory catalog snapshot handed to the engine on every call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::matcher::normalize;
use crate::models::{Condition, InventoryItem};

/// Reference data for one request: conditions, inventory and the
/// condition-name → medication-hint mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    /// Condition display name → free-text medication names
    #[serde(default)]
    pub medication_hints: BTreeMap<String, Vec<String>>,
}

impl CatalogSnapshot {
    pub fn new(conditions: Vec<Condition>, inventory: Vec<InventoryItem>) -> Self {
        Self {
            conditions,
            inventory,
            medication_hints: BTreeMap::new(),
        }
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Medication hints for a condition.
    ///
    /// The explicit mapping wins; the condition's own associated medications
    /// are used when the mapping has no entry for it.
    pub fn hints_for(&self, condition_name: &str) -> Vec<String> {
        let wanted = normalize(condition_name);

        if let Some(hints) = self
            .medication_hints
            .iter()
            .find(|(name, _)| normalize(name) == wanted)
            .map(|(_, hints)| hints)
        {
            return hints.clone();
        }

        self.find_condition(condition_name)
            .map(|c| c.medications.clone())
            .unwrap_or_default()
    }

    /// Look up a condition by name: exact normalized match first, then the
    /// first condition whose name contains the query.
    pub fn find_condition(&self, name: &str) -> Option<&Condition> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }

        self.conditions
            .iter()
            .find(|c| normalize(&c.name) == wanted)
            .or_else(|| {
                self.conditions
                    .iter()
                    .find(|c| normalize(&c.name).contains(&wanted))
            })
    }

    /// Conditions whose name contains the query, in catalog order.
    ///
    /// Queries shorter than two characters return nothing. The species filter
    /// also accepts the plural form stored in the catalog.
    pub fn search_conditions(&self, query: &str, species: Option<&str>) -> Vec<&Condition> {
        let wanted = normalize(query);
        if wanted.chars().count() < 2 {
            return Vec::new();
        }
        let species = species.filter(|s| !s.trim().is_empty());

        self.conditions
            .iter()
            .filter(|c| normalize(&c.name).contains(&wanted))
            .filter(|c| species.map_or(true, |s| c.affects_species_loosely(s)))
            .collect()
    }

    pub fn find_item(&self, sku: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.sku == sku)
    }

    /// SHA-256 over the canonical JSON form, hex encoded.
    pub fn fingerprint(&self) -> String {
        // Serializing plain data with string keys cannot fail.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CatalogSnapshot {
        let mut gastro = Condition::new(1, "Gastroenteritis".into());
        gastro.medications = vec!["Metronidazol".into()];
        let mut hemorrhagic = Condition::new(2, "Gastroenteritis hemorrágica".into());
        hemorrhagic.medications = vec!["Omeprazol".into()];

        let mut snapshot = CatalogSnapshot::new(vec![gastro, hemorrhagic], vec![]);
        snapshot
            .medication_hints
            .insert("Gastroenteritis".into(), vec!["Suero Oral".into()]);
        snapshot
    }

    #[test]
    fn test_hints_prefer_mapping() {
        let snapshot = snapshot();
        assert_eq!(snapshot.hints_for("gastroenteritis"), vec!["Suero Oral"]);
    }

    #[test]
    fn test_hints_fall_back_to_condition() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.hints_for("Gastroenteritis hemorragica"),
            vec!["Omeprazol"]
        );
        assert!(snapshot.hints_for("Otitis").is_empty());
    }

    #[test]
    fn test_find_condition_exact_then_partial() {
        let snapshot = snapshot();
        assert_eq!(snapshot.find_condition("GASTROENTERITIS").unwrap().id, 1);
        assert_eq!(snapshot.find_condition("hemorragica").unwrap().id, 2);
        assert!(snapshot.find_condition("moquillo").is_none());
        assert!(snapshot.find_condition("  ").is_none());
    }

    #[test]
    fn test_search_conditions() {
        let mut snapshot = snapshot();
        snapshot.conditions[0].species = vec!["Perros".into()];
        snapshot.conditions[1].species = vec!["gato".into()];

        let names: Vec<&str> = snapshot
            .search_conditions("GASTRO", None)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Gastroenteritis", "Gastroenteritis hemorrágica"]);

        let dogs = snapshot.search_conditions("gastro", Some("perro"));
        assert_eq!(dogs.len(), 1);
        assert_eq!(dogs[0].id, 1);

        assert!(snapshot.search_conditions("g", None).is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = snapshot();
        let mut b = snapshot();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        b.conditions[0].symptoms.push("Vómito".into());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
