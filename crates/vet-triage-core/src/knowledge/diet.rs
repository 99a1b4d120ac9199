//! Diet recommendations by species, life stage and medical condition.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::matcher::normalize;
use crate::models::{DietKind, DietPlan, DietRecommendation, InventoryItem, StoreAvailability};

use super::{KeywordMap, KnowledgeError, KnowledgeResult};

/// Maximum foods recommended per plan.
const MAX_DIET_RECOMMENDATIONS: usize = 5;

/// A regular food and what it is good for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegularFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Food tables and the synonyms used to read a patient profile.
#[derive(Debug, Clone, Deserialize)]
pub struct DietGuide {
    /// Species wording → canonical species key
    pub species_synonyms: KeywordMap<String>,
    /// Life-stage wording → canonical stage key
    pub life_stage_synonyms: KeywordMap<String>,
    pub default_life_stage: String,
    /// Condition keyword → therapeutic category
    pub condition_categories: KeywordMap<String>,
    /// Category → species → foods
    pub therapeutic: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// Species → life stage → foods
    pub regular: BTreeMap<String, BTreeMap<String, Vec<RegularFood>>>,
}

impl DietGuide {
    /// Canonical species key, if the wording is recognized.
    pub fn resolve_species(&self, species: &str) -> Option<&str> {
        let species = normalize(species);
        self.species_synonyms
            .first_contained_in(&species)
            .map(|(_, key)| key.as_str())
    }

    /// Canonical life-stage key; unknown or missing stages read as the default.
    pub fn resolve_life_stage(&self, life_stage: Option<&str>) -> &str {
        life_stage
            .and_then(|stage| self.life_stage_synonyms.get(stage))
            .map(String::as_str)
            .unwrap_or(self.default_life_stage.as_str())
    }

    /// Therapeutic category for a medical condition description.
    pub fn therapeutic_category(&self, condition: &str) -> Option<&str> {
        let condition = normalize(condition);
        self.condition_categories
            .first_contained_in(&condition)
            .map(|(_, category)| category.as_str())
    }

    /// Build a diet plan and check which foods the store carries.
    ///
    /// A recognized medical condition yields therapeutic foods for the
    /// species; otherwise regular food for the species and life stage.
    pub fn recommend(
        &self,
        species: &str,
        life_stage: Option<&str>,
        medical_condition: Option<&str>,
        inventory: &[InventoryItem],
    ) -> KnowledgeResult<DietPlan> {
        if species.trim().is_empty() {
            return Err(KnowledgeError::InvalidInput(
                "species is required for a diet recommendation".into(),
            ));
        }

        let species_key = self.resolve_species(species);
        let stage_key = self.resolve_life_stage(life_stage);
        let medical_condition = medical_condition
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let mut kind = DietKind::Regular;
        let mut recommendations = Vec::new();

        if let (Some(condition), Some(species_key)) = (&medical_condition, species_key) {
            if let Some(category) = self.therapeutic_category(condition) {
                let foods = self
                    .therapeutic
                    .get(category)
                    .and_then(|by_species| by_species.get(species_key));

                for food in foods.into_iter().flatten() {
                    recommendations.push(DietRecommendation {
                        name: food.clone(),
                        kind: DietKind::Therapeutic,
                        indication: category.to_string(),
                        requires_prescription: true,
                    });
                }
                if !recommendations.is_empty() {
                    kind = DietKind::Therapeutic;
                }
            }
        }

        if recommendations.is_empty() {
            let foods = species_key
                .and_then(|key| self.regular.get(key))
                .and_then(|by_stage| by_stage.get(stage_key));

            for food in foods.into_iter().flatten() {
                recommendations.push(DietRecommendation {
                    name: food.name.clone(),
                    kind: DietKind::Regular,
                    indication: food.description.clone(),
                    requires_prescription: false,
                });
            }
        }

        recommendations.truncate(MAX_DIET_RECOMMENDATIONS);
        let availability = store_availability(&recommendations, inventory);

        tracing::debug!(
            species = species_key.unwrap_or("unknown"),
            life_stage = stage_key,
            therapeutic = kind == DietKind::Therapeutic,
            recommendations = recommendations.len(),
            in_store = availability.len(),
            "diet plan"
        );

        Ok(DietPlan {
            species: species_key.unwrap_or(species).to_string(),
            life_stage: stage_key.to_string(),
            medical_condition,
            kind,
            recommendations,
            availability,
        })
    }
}

/// First inventory item carrying each recommended food.
fn store_availability(
    recommendations: &[DietRecommendation],
    inventory: &[InventoryItem],
) -> Vec<StoreAvailability> {
    let names: Vec<(&InventoryItem, String)> = inventory
        .iter()
        .map(|item| (item, normalize(&item.name)))
        .collect();

    recommendations
        .iter()
        .filter_map(|rec| {
            let wanted = normalize(&rec.name);
            names
                .iter()
                .find(|(_, name)| name.contains(wanted.as_str()))
                .map(|(item, _)| StoreAvailability {
                    sku: item.sku.clone(),
                    name: item.name.clone(),
                    available: item.stock_state().is_available(),
                    price: item.unit_price,
                })
        })
        .collect()
}
