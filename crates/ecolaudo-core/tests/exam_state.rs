use std::collections::BTreeMap;

use ecolaudo_core::models::exam::{ExamState, SavedExam, AUTOSAVE_TTL, LAST_EXAM_TTL};
use ecolaudo_core::models::finding::{FieldValue, FindingInstance};
use ecolaudo_core::models::organ::{breast_catalog, Finding};

fn nodule() -> Finding {
    Finding::new("nodulo-solido", "Nódulo sólido", "Lesão nodular sólida")
}

fn instance(size: &str) -> FindingInstance {
    let mut m = BTreeMap::new();
    m.insert("size".to_string(), FieldValue::from(size));
    FindingInstance::with_id("i-1", m)
}

#[test]
fn adding_finding_removes_organ_from_normal_set() {
    let mut state = ExamState::new();
    state.set_organ_normal("mama-direita", true);
    assert!(state.is_organ_normal("mama-direita"));

    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![instance("1.2 cm")]);

    assert!(!state.is_organ_normal("mama-direita"));
    assert_eq!(state.selected_findings.len(), 1);
}

#[test]
fn marking_normal_clears_findings_for_that_organ() {
    let mut state = ExamState::new();
    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![]);
    state.set_finding("mama-esquerda", "nodulos", nodule(), None, vec![]);

    state.set_organ_normal("mama-direita", true);

    assert!(state.is_organ_normal("mama-direita"));
    assert_eq!(state.findings_for_organ("mama-direita").count(), 0);
    // The other breast is untouched.
    assert_eq!(state.findings_for_organ("mama-esquerda").count(), 1);
}

#[test]
fn exclusivity_operations_are_idempotent() {
    let mut state = ExamState::new();
    state.set_organ_normal("axilas", true);
    state.set_organ_normal("axilas", true);
    assert_eq!(state.normal_organs.len(), 1);

    state.set_finding("axilas", "linfonodos", nodule(), None, vec![]);
    state.set_finding("axilas", "linfonodos", nodule(), Some("leve".to_string()), vec![]);
    assert_eq!(state.selected_findings.len(), 1);
    assert_eq!(state.selected_findings[0].severity.as_deref(), Some("leve"));
}

#[test]
fn updating_finding_replaces_instances() {
    let mut state = ExamState::new();
    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![instance("1.0 cm")]);
    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![instance("1.4 cm")]);

    let finding = &state.selected_findings[0];
    assert_eq!(finding.instances.len(), 1);
    assert_eq!(finding.first_text_field("size"), Some("1.4 cm"));
}

#[test]
fn remove_finding_drops_instances_with_it() {
    let mut state = ExamState::new();
    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![instance("1.0 cm")]);
    state.remove_finding("mama-direita", "nodulo-solido");
    assert!(state.is_empty());
}

#[test]
fn reset_clears_everything() {
    let mut state = ExamState::new();
    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![]);
    state.set_organ_normal("mama-esquerda", true);
    state.reset();
    assert!(state.is_empty());
}

#[test]
fn saved_exam_expires_after_ttl() {
    let saved_at: jiff::Timestamp = "2026-08-07T10:00:00Z".parse().unwrap();
    let saved = SavedExam::new(ExamState::new(), saved_at);

    let just_before: jiff::Timestamp = "2026-08-07T10:59:59Z".parse().unwrap();
    let just_after: jiff::Timestamp = "2026-08-07T11:00:01Z".parse().unwrap();
    assert!(!saved.is_expired(just_before, AUTOSAVE_TTL));
    assert!(saved.is_expired(just_after, AUTOSAVE_TTL));

    let next_day: jiff::Timestamp = "2026-08-08T10:00:01Z".parse().unwrap();
    assert!(!saved.is_expired(just_after, LAST_EXAM_TTL));
    assert!(saved.is_expired(next_day, LAST_EXAM_TTL));
}

#[test]
fn saved_exam_round_trips_through_json() {
    let mut state = ExamState::new();
    state.set_finding("mama-direita", "nodulos", nodule(), None, vec![instance("1.2 cm")]);
    let saved_at: jiff::Timestamp = "2026-08-07T10:00:00Z".parse().unwrap();

    let raw = SavedExam::new(state, saved_at).to_json().unwrap();
    let restored = SavedExam::from_json(&raw).unwrap();

    assert_eq!(restored.saved_at, saved_at);
    assert_eq!(restored.state.selected_findings.len(), 1);
    assert_eq!(
        restored.state.selected_findings[0].first_text_field("size"),
        Some("1.2 cm")
    );

    assert!(SavedExam::from_json("not json").is_err());
}

#[test]
fn catalog_lookups_fall_back_to_raw_ids() {
    let catalog = breast_catalog();
    assert_eq!(catalog.organ_name("mama-direita"), "Mama Direita");
    assert_eq!(catalog.organ_name("desconhecido"), "desconhecido");
    assert_eq!(catalog.category_name("mama-direita", "nodulos"), "Nódulos");
    assert_eq!(catalog.category_name("mama-direita", "nada"), "nada");
}
