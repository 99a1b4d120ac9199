//! Diagnosis-to-medication linking.
//!
//! Medication hints are free text ("Suero Oral", "Metronidazol"), resolved
//! against inventory names by normalized containment rather than by id.

use std::collections::HashSet;

use crate::config::LinkingConfig;
use crate::models::{InventoryItem, MedicationSuggestion};

use super::normalizer::{normalize, words};

/// Links medication hints to stock-annotated inventory items.
pub struct MedicationLinker {
    excluded_categories: HashSet<String>,
    min_token_len: usize,
}

impl Default for MedicationLinker {
    fn default() -> Self {
        Self::new(&LinkingConfig::default())
    }
}

impl MedicationLinker {
    pub fn new(config: &LinkingConfig) -> Self {
        Self {
            excluded_categories: config
                .excluded_categories
                .iter()
                .map(|c| normalize(c))
                .collect(),
            min_token_len: config.min_token_len,
        }
    }

    /// Whether an inventory category may be recommended as medication.
    pub fn is_medication_category(&self, category: &str) -> bool {
        !self.excluded_categories.contains(&normalize(category))
    }

    /// Whether a normalized inventory name satisfies a normalized hint.
    fn name_matches(&self, hint: &str, name: &str) -> bool {
        name.contains(hint)
            || hint.contains(name)
            || words(hint)
                .filter(|w| w.chars().count() > self.min_token_len)
                .any(|w| name.contains(w))
    }

    /// Resolve hints against the inventory.
    ///
    /// Results are unique by SKU and sorted in-stock, low, out, then by name.
    pub fn link(&self, hints: &[String], inventory: &[InventoryItem]) -> Vec<MedicationSuggestion> {
        let candidates: Vec<(&InventoryItem, String)> = inventory
            .iter()
            .filter(|item| self.is_medication_category(&item.category))
            .map(|item| (item, normalize(&item.name)))
            .filter(|(_, name)| !name.is_empty())
            .collect();

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for hint in hints {
            let hint_norm = normalize(hint);
            if hint_norm.is_empty() {
                continue;
            }

            for (item, name) in &candidates {
                if self.name_matches(&hint_norm, name) && seen.insert(item.sku.clone()) {
                    suggestions.push(MedicationSuggestion::from_item(item, hint));
                }
            }
        }

        sort_by_availability(&mut suggestions);
        suggestions
    }
}

/// Sort in-stock first, then low, then out of stock; alphabetical within each.
pub fn sort_by_availability(suggestions: &mut [MedicationSuggestion]) {
    suggestions.sort_by(|a, b| {
        a.stock_state
            .cmp(&b.stock_state)
            .then_with(|| normalize(&a.name).cmp(&normalize(&b.name)))
            .then_with(|| a.name.cmp(&b.name))
    });
}
