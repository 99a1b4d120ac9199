//! Exam suggestions for a diagnosed condition.

use serde::Deserialize;

use crate::matcher::normalize;
use crate::models::{ExamSuggestion, InventoryItem};

use super::KeywordMap;

/// Maximum number of exams suggested per condition.
pub const MAX_EXAM_SUGGESTIONS: usize = 10;

/// Label used for exams coming from the basic panel fallback.
pub const BASIC_EXAM_KIND: &str = "basic";

/// Condition keyword → exam keywords, plus a basic panel fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamGuide {
    /// Exam keywords offered when nothing specific is stocked
    #[serde(default)]
    pub basic_panel: Vec<String>,
    #[serde(default)]
    pub by_condition: KeywordMap<Vec<String>>,
}

impl ExamGuide {
    /// Exam keywords recommended for a condition name.
    ///
    /// A keyword overlapping the name wins; otherwise the first keyword
    /// sharing a whole word with it.
    pub fn exams_for(&self, condition_name: &str) -> &[String] {
        let name = normalize(condition_name);
        if name.is_empty() {
            return &[];
        }

        self.by_condition
            .first_overlapping(&name)
            .or_else(|| self.by_condition.first_sharing_word(&name))
            .map(|(_, exams)| exams.as_slice())
            .unwrap_or(&[])
    }

    /// Exam services in stock that fit a condition.
    ///
    /// Only items in `exam_category` are considered. Each item is labelled with
    /// the first exam keyword it satisfies. When nothing fits, the basic panel
    /// is offered instead.
    pub fn suggest(
        &self,
        condition_name: &str,
        inventory: &[InventoryItem],
        exam_category: &str,
    ) -> Vec<ExamSuggestion> {
        let category = normalize(exam_category);
        let services: Vec<(&InventoryItem, String)> = inventory
            .iter()
            .filter(|item| normalize(&item.category) == category)
            .map(|item| (item, normalize(&item.name)))
            .filter(|(_, name)| !name.is_empty())
            .collect();

        let wanted: Vec<(&str, String)> = self
            .exams_for(condition_name)
            .iter()
            .map(|exam| (exam.as_str(), normalize(exam)))
            .collect();

        let mut suggestions: Vec<ExamSuggestion> = services
            .iter()
            .filter_map(|(item, name)| {
                wanted
                    .iter()
                    .find(|(_, exam)| name.contains(exam.as_str()) || exam.contains(name.as_str()))
                    .map(|(label, _)| suggestion(item, label))
            })
            .collect();

        if suggestions.is_empty() {
            let basic: Vec<String> = self.basic_panel.iter().map(|b| normalize(b)).collect();
            suggestions = services
                .iter()
                .filter(|(_, name)| basic.iter().any(|b| name.contains(b.as_str())))
                .map(|(item, _)| suggestion(item, BASIC_EXAM_KIND))
                .collect();
        }

        tracing::debug!(
            condition = condition_name,
            exams = suggestions.len(),
            "exam suggestions"
        );

        suggestions.truncate(MAX_EXAM_SUGGESTIONS);
        suggestions
    }
}

fn suggestion(item: &InventoryItem, kind: &str) -> ExamSuggestion {
    ExamSuggestion {
        sku: item.sku.clone(),
        name: item.name.clone(),
        price: item.unit_price,
        exam_kind: kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> ExamGuide {
        ExamGuide {
            basic_panel: vec!["HEMOGRAMA".into(), "ORINA".into()],
            by_condition: KeywordMap::from_pairs([
                ("parvovirus", vec!["PARVO".to_string(), "HEMOGRAMA".to_string()]),
                ("insuficiencia renal", vec!["PERFIL RENAL".to_string()]),
                ("otitis", vec!["CITOLOGIA OTICA".to_string()]),
            ]),
        }
    }

    fn exam(sku: &str, name: &str, price: f64) -> InventoryItem {
        let mut item = InventoryItem::new(sku.into(), name.into(), "Exámenes".into());
        item.unit_price = price;
        item
    }

    fn inventory() -> Vec<InventoryItem> {
        vec![
            exam("EX-1", "Test rápido Parvo/Corona", 25.0),
            exam("EX-2", "Hemograma completo", 18.0),
            exam("EX-3", "Perfil renal", 40.0),
            exam("EX-4", "Examen de orina", 12.0),
            // a medicine that happens to share a keyword
            InventoryItem::new("M-1".into(), "Hemograma kit".into(), "Insumos".into()),
        ]
    }

    #[test]
    fn test_exams_for_overlap_then_shared_word() {
        let guide = guide();
        assert_eq!(guide.exams_for("Parvovirus canino"), ["PARVO", "HEMOGRAMA"]);
        assert_eq!(guide.exams_for("Otitis"), ["CITOLOGIA OTICA"]);
        assert_eq!(guide.exams_for("Falla renal aguda"), ["PERFIL RENAL"]);
        assert!(guide.exams_for("Moquillo").is_empty());
        assert!(guide.exams_for(" ").is_empty());
    }

    #[test]
    fn test_suggest_matches_exam_services() {
        let suggestions = guide().suggest("Parvovirus", &inventory(), "Exámenes");
        let skus: Vec<&str> = suggestions.iter().map(|s| s.sku.as_str()).collect();
        assert_eq!(skus, vec!["EX-1", "EX-2"]);
        assert_eq!(suggestions[0].exam_kind, "PARVO");
        assert_eq!(suggestions[1].exam_kind, "HEMOGRAMA");
        assert_eq!(suggestions[1].price, 18.0);
    }

    #[test]
    fn test_basic_panel_fallback() {
        let suggestions = guide().suggest("Moquillo", &inventory(), "examenes");
        let skus: Vec<&str> = suggestions.iter().map(|s| s.sku.as_str()).collect();
        assert_eq!(skus, vec!["EX-2", "EX-4"]);
        assert!(suggestions.iter().all(|s| s.exam_kind == BASIC_EXAM_KIND));
    }

    #[test]
    fn test_capped() {
        let inventory: Vec<InventoryItem> = (0..15)
            .map(|i| exam(&format!("H-{i}"), &format!("Hemograma {i}"), 10.0))
            .collect();
        let suggestions = guide().suggest("Parvovirus", &inventory, "Exámenes");
        assert_eq!(suggestions.len(), MAX_EXAM_SUGGESTIONS);
    }
}
