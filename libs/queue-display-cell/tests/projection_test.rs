mod common;

use serde_json::json;

use queue_display_cell::*;
use queue_display_cell::services::projection::{matches_filter, project, render_view};
use shared_utils::test_utils::MockClinicResponses;

use common::{entries_from, sample_entries};

fn snapshot() -> QueueSnapshot {
    QueueSnapshot::new(sample_entries())
}

fn ids(cards: &[DoctorCard]) -> Vec<&str> {
    cards.iter().map(|c| c.doctor_id.as_str()).collect()
}

#[test]
fn test_all_filter_keeps_every_entry_in_order() {
    let cards = project(&snapshot(), &FilterState::default());
    assert_eq!(ids(&cards), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_department_filter_keeps_only_that_department() {
    let filter = FilterState::new(DepartmentFilter::Only(Department::Cardiology), "");
    let cards = project(&snapshot(), &filter);

    assert_eq!(ids(&cards), vec!["1", "4"]);
    assert!(cards.iter().all(|c| c.department == Department::Cardiology));
}

#[test]
fn test_search_is_case_insensitive_over_name_and_specialty() {
    let filter = FilterState::new(DepartmentFilter::All, "Lee");
    let cards = project(&snapshot(), &filter);

    // "Dr. Karen Lee" by name, "Dr. Rami Fleet" because "fleet" contains "lee".
    assert_eq!(ids(&cards), vec!["1", "4"]);

    let by_specialty = project(&snapshot(), &FilterState::new(DepartmentFilter::All, "PEDIATRIC"));
    assert_eq!(ids(&by_specialty), vec!["2"]);
}

#[test]
fn test_department_and_search_must_both_match() {
    let filter = FilterState::new(DepartmentFilter::Only(Department::Pediatrics), "lee");
    assert!(project(&snapshot(), &filter).is_empty());

    let filter = FilterState::new(DepartmentFilter::Only(Department::Cardiology), "surgeon");
    assert_eq!(ids(&project(&snapshot(), &filter)), vec!["4"]);
}

#[test]
fn test_whitespace_only_search_matches_everything() {
    let filter = FilterState::new(DepartmentFilter::All, "   ");
    assert_eq!(project(&snapshot(), &filter).len(), 4);
}

#[test]
fn test_projection_is_exactly_the_matching_subsequence() {
    let snapshot = snapshot();
    let filters = [
        FilterState::default(),
        FilterState::new(DepartmentFilter::Only(Department::General), ""),
        FilterState::new(DepartmentFilter::Only(Department::Neurology), ""),
        FilterState::new(DepartmentFilter::All, "dr."),
        FilterState::new(DepartmentFilter::All, "ali"),
        FilterState::new(DepartmentFilter::Only(Department::Cardiology), "karen"),
    ];

    for filter in &filters {
        let expected: Vec<&str> = snapshot
            .entries()
            .iter()
            .filter(|e| matches_filter(e, filter))
            .map(|e| e.doctor_id.as_str())
            .collect();
        let cards = project(&snapshot, filter);
        assert_eq!(ids(&cards), expected, "filter {:?}", filter);
    }
}

#[test]
fn test_missing_current_patient_and_waiting_render_placeholder_and_zero() {
    let entries = entries_from(json!({
        "queues": [{
            "doctor_id": 9,
            "doctor_name": "Dr. Idle",
            "doctor_specialty": "Dermatologist",
            "department": "dermatology"
        }]
    }));

    let cards = project(&QueueSnapshot::new(entries), &FilterState::default());
    let card = &cards[0];

    assert!(card.current_patient.is_none());
    assert_eq!(card.current_patient_label, NO_CURRENT_PATIENT);
    assert_eq!(card.waiting_count, 0);
    assert_eq!(card.average_wait_minutes, 0.0);
}

#[test]
fn test_unknown_status_renders_as_available() {
    let entries = entries_from(MockClinicResponses::queue_list(vec![
        MockClinicResponses::queue_entry(1, "Dr. A", "GP", "general", "vacation"),
        MockClinicResponses::idle_queue_entry(2, "Dr. B", "GP", "general"),
    ]));

    let cards = project(&QueueSnapshot::new(entries), &FilterState::default());

    assert_eq!(cards[0].status, DoctorStatus::Available);
    assert_eq!(cards[0].status_label, "Available");
    assert_eq!(cards[1].status_label, "On Break");
}

#[test]
fn test_case_kind_labels() {
    let entries = entries_from(json!({
        "queues": [
            { "doctor_id": 1, "currentPatient": { "number": "P-001", "name": "A", "case": "urgent", "time": "09:00" } },
            { "doctor_id": 2, "currentPatient": { "number": "P-002", "name": "B", "case": "followup", "time": "09:10" } },
            { "doctor_id": 3, "currentPatient": { "number": "P-003", "name": "C", "case": "vip", "time": "09:20" } }
        ]
    }));

    let cards = project(&QueueSnapshot::new(entries), &FilterState::default());
    let labels: Vec<&str> = cards
        .iter()
        .map(|c| c.current_patient.as_ref().map(|p| p.case_label.as_str()).unwrap_or("-"))
        .collect();

    assert_eq!(labels, vec!["Urgent", "Follow-up", ""]);
    assert_eq!(cards[0].current_patient_label, "P-001 A");
}

#[test]
fn test_unknown_department_falls_back_to_general() {
    let entries = entries_from(MockClinicResponses::queue_list(vec![
        MockClinicResponses::queue_entry(1, "Dr. A", "GP", "radiology", "available"),
    ]));

    assert_eq!(entries[0].department, Department::General);
}

#[test]
fn test_render_view_counts_and_stats() {
    let filter = FilterState::new(DepartmentFilter::Only(Department::Cardiology), "");
    let view = render_view(&snapshot(), &filter, None);

    assert_eq!(view.total, 4);
    assert_eq!(view.shown, 2);
    assert_eq!(view.stats.in_session, 1);
    assert_eq!(view.stats.available, 1);
    assert_eq!(view.stats.on_break, 0);
    assert_eq!(view.stats.total_waiting, 4);
    assert_eq!(view.filter, filter);
    assert!(view.last_updated.is_none());
}

#[test]
fn test_department_filter_parsing() {
    assert_eq!("all".parse::<DepartmentFilter>(), Ok(DepartmentFilter::All));
    assert_eq!("".parse::<DepartmentFilter>(), Ok(DepartmentFilter::All));
    assert_eq!(
        "Cardiology".parse::<DepartmentFilter>(),
        Ok(DepartmentFilter::Only(Department::Cardiology))
    );
    assert!("radiology".parse::<DepartmentFilter>().is_err());
}
