//! Golden tests for diagnosis suggestion.
//!
//! Each case pins the exact scores, percentages and orderings the engine
//! produces for a small clinic catalog.

use vet_triage_core::catalog::CatalogSnapshot;
use vet_triage_core::matcher::{aggregate, DiagnosisEngine, MatchError, SymptomScorer};
use vet_triage_core::models::{
    Condition, DiagnosisOutcome, InventoryItem, StockState, SymptomQuery,
};

fn condition(id: u32, name: &str, species: &[&str], symptoms: &[&str]) -> Condition {
    let mut c = Condition::new(id, name.to_string());
    c.species = species.iter().map(|s| s.to_string()).collect();
    c.symptoms = symptoms.iter().map(|s| s.to_string()).collect();
    c
}

fn item(sku: &str, name: &str, category: &str, quantity: u32) -> InventoryItem {
    let mut item = InventoryItem::new(sku.to_string(), name.to_string(), category.to_string());
    item.quantity = quantity;
    item
}

fn clinic_catalog() -> CatalogSnapshot {
    let conditions = vec![
        condition(
            1,
            "Gastroenteritis",
            &["perro", "gato"],
            &["Vómito", "Diarrea con sangre", "Fiebre"],
        ),
        condition(2, "Otitis externa", &["perro"], &["Sacude la cabeza", "Mal olor en oídos"]),
        condition(3, "Traqueobronquitis", &["perro"], &["Tos"]),
        condition(4, "Rinotraqueítis felina", &["gato"], &["Estornudos", "Secreción nasal", "Fiebre"]),
    ];
    let inventory = vec![
        item("SU-1", "Suero Oral Rehidratante", "Sueros", 0),
        item("SU-2", "Suero Oral Sabor Pollo", "Sueros", 25),
        item("EX-1", "Suero oral (análisis)", "Exámenes", 100),
    ];

    let mut snapshot = CatalogSnapshot::new(conditions, inventory);
    snapshot
        .medication_hints
        .insert("Gastroenteritis".to_string(), vec!["Suero Oral".to_string()]);
    snapshot
}

#[test]
fn test_scenario_a_exact_and_partial() {
    let engine = DiagnosisEngine::default();
    let query = SymptomQuery::new(["vomito", "diarrea"]).for_species("perro");

    let report = engine.suggest(&query, &clinic_catalog()).unwrap();
    let results = report.results();

    assert_eq!(results.len(), 1);
    let top = &results[0];
    assert_eq!(top.condition.name, "Gastroenteritis");
    assert_eq!(top.percentage, 95.0);
    assert_eq!(top.match_count, 2);
    assert_eq!(top.matched_symptoms, vec!["Vómito", "Diarrea con sangre"]);
    assert_eq!(top.query_symptom_count, 2);
    assert_eq!(top.condition_symptom_count, 3);

    let scorer = SymptomScorer::default();
    let evidence = aggregate(
        &scorer,
        &["vomito".to_string(), "diarrea".to_string()],
        &clinic_catalog().conditions[0].symptoms,
    );
    assert!((evidence.total_score - 1.9).abs() < 1e-9);
}

#[test]
fn test_scenario_b_short_shared_word_scores_zero() {
    let engine = DiagnosisEngine::default();
    let mut catalog = clinic_catalog();
    catalog.conditions = vec![condition(1, "Bronquitis", &["perro"], &["tos seca"])];

    // the only shared word, "tos", is too short to count on its own
    let report = engine
        .suggest(&SymptomQuery::new(["tos con flema"]), &catalog)
        .unwrap();
    assert!(!report.is_match());
}

#[test]
fn test_scenario_b_containment_takes_precedence() {
    let engine = DiagnosisEngine::default();
    let catalog = clinic_catalog();

    // "tos" is contained in the input, so the containment rule fires first
    let report = engine
        .suggest(&SymptomQuery::new(["tos seca persistente"]), &catalog)
        .unwrap();
    let results = report.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].condition.name, "Traqueobronquitis");
    assert_eq!(results[0].percentage, 85.0);
}

#[test]
fn test_scenario_c_empty_query_rejected() {
    let engine = DiagnosisEngine::default();
    let result = engine.suggest(&SymptomQuery::new(Vec::<String>::new()), &clinic_catalog());
    assert!(matches!(result, Err(MatchError::InvalidInput(_))));
}

#[test]
fn test_scenario_d_no_match_is_explicit() {
    let engine = DiagnosisEngine::default();
    let query = SymptomQuery::new(["cojera", "inflamacion de rodilla", "dolor al caminar"]);

    let report = engine.suggest(&query, &clinic_catalog()).unwrap();
    assert_eq!(report.outcome, DiagnosisOutcome::NoMatch);
    assert!(report.results().is_empty());
    assert_eq!(report.message(), "No diagnoses found for the reported symptoms.");

    let json = report.to_json().unwrap();
    assert!(json.contains("\"status\": \"no_match\""));
}

#[test]
fn test_scenario_e_out_of_stock_sorted_last() {
    let engine = DiagnosisEngine::default();
    let query = SymptomQuery::new(["vomito", "diarrea"]).with_medications();

    let report = engine.suggest(&query, &clinic_catalog()).unwrap();
    let medications = &report.results()[0].medications;

    // the exam service is excluded by category
    let skus: Vec<&str> = medications.iter().map(|m| m.sku.as_str()).collect();
    assert_eq!(skus, vec!["SU-2", "SU-1"]);
    assert_eq!(medications[0].stock_state, StockState::InStock);
    assert_eq!(medications[1].stock_state, StockState::OutOfStock);
}

#[test]
fn test_species_filter_and_ordering() {
    let engine = DiagnosisEngine::default();
    let query = SymptomQuery::new(["fiebre", "estornudos"]);

    let report = engine.suggest(&query, &clinic_catalog()).unwrap();
    let names: Vec<&str> = report
        .results()
        .iter()
        .map(|r| r.condition.name.as_str())
        .collect();
    assert_eq!(names, vec!["Rinotraqueítis felina", "Gastroenteritis"]);
    assert_eq!(report.results()[0].percentage, 100.0);
    assert_eq!(report.results()[1].percentage, 50.0);

    let dogs = engine
        .suggest(&query.clone().for_species("PERRO"), &clinic_catalog())
        .unwrap();
    assert_eq!(dogs.results().len(), 1);
    assert_eq!(dogs.results()[0].condition.name, "Gastroenteritis");
}

#[test]
fn test_unmatched_symptoms_get_hints() {
    let engine = DiagnosisEngine::default();
    let query = SymptomQuery::new(["vomito", "estornudoz"]);

    let report = engine.suggest(&query, &clinic_catalog()).unwrap();
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].symptom, "estornudoz");
    assert_eq!(report.unmatched[0].closest_known.as_deref(), Some("Estornudos"));
}

#[test]
fn test_report_is_stamped() {
    let engine = DiagnosisEngine::default();
    let catalog = clinic_catalog();
    let report = engine
        .suggest(&SymptomQuery::new(["vomito"]), &catalog)
        .unwrap();

    assert_eq!(report.catalog_fingerprint, catalog.fingerprint());
    assert!(uuid::Uuid::parse_str(&report.report_id).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
}
