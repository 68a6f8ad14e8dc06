//! Pure projection from (snapshot, filter) to the dashboard view model.
//!
//! Nothing in here touches the network or the controller's state; every
//! render rebuilds the whole card list from scratch.

use chrono::{DateTime, Local, Utc};

use crate::{
    CurrentPatient, CurrentPatientCard, DepartmentFilter, DoctorCard, DoctorQueueEntry,
    DoctorStatus, FilterState, QueueSnapshot, QueueStats, QueueView, NO_CURRENT_PATIENT,
};

/// An entry matches when its department passes the department filter and,
/// if search text is given, its name or specialty contains it (case-insensitive).
pub fn matches_filter(entry: &DoctorQueueEntry, filter: &FilterState) -> bool {
    let department_ok = match filter.department {
        DepartmentFilter::All => true,
        DepartmentFilter::Only(department) => entry.department == department,
    };
    if !department_ok {
        return false;
    }

    let needle = filter.search.trim().to_lowercase();
    needle.is_empty()
        || entry.doctor_name.to_lowercase().contains(&needle)
        || entry.specialty.to_lowercase().contains(&needle)
}

pub fn project(snapshot: &QueueSnapshot, filter: &FilterState) -> Vec<DoctorCard> {
    snapshot
        .entries()
        .iter()
        .filter(|entry| matches_filter(entry, filter))
        .map(to_card)
        .collect()
}

pub fn to_card(entry: &DoctorQueueEntry) -> DoctorCard {
    let current_patient = entry.current_patient.as_ref().map(to_patient_card);
    let current_patient_label = entry
        .current_patient
        .as_ref()
        .map(current_patient_label)
        .unwrap_or_else(|| NO_CURRENT_PATIENT.to_string());

    DoctorCard {
        doctor_id: entry.doctor_id.clone(),
        doctor_name: entry.doctor_name.clone(),
        specialty: entry.specialty.clone(),
        department: entry.department,
        department_label: entry.department.label().to_string(),
        status: entry.status,
        status_label: entry.status.label().to_string(),
        current_patient,
        current_patient_label,
        waiting_count: entry.waiting.len(),
        average_wait_minutes: entry.average_wait_minutes,
    }
}

fn to_patient_card(patient: &CurrentPatient) -> CurrentPatientCard {
    CurrentPatientCard {
        number: patient.number.clone(),
        name: patient.name.clone(),
        case_label: patient.case_kind.label().to_string(),
        time: patient.time.clone(),
    }
}

fn current_patient_label(patient: &CurrentPatient) -> String {
    match (patient.number.is_empty(), patient.name.is_empty()) {
        (false, false) => format!("{} {}", patient.number, patient.name),
        (false, true) => patient.number.clone(),
        (true, false) => patient.name.clone(),
        (true, true) => NO_CURRENT_PATIENT.to_string(),
    }
}

pub fn summarize(cards: &[DoctorCard]) -> QueueStats {
    cards.iter().fold(QueueStats::default(), |mut stats, card| {
        match card.status {
            DoctorStatus::Available => stats.available += 1,
            DoctorStatus::InSession => stats.in_session += 1,
            DoctorStatus::OnBreak => stats.on_break += 1,
        }
        stats.total_waiting += card.waiting_count;
        stats
    })
}

/// Builds the full view. `last_updated` is `None` until the first successful fetch.
pub fn render_view(
    snapshot: &QueueSnapshot,
    filter: &FilterState,
    last_updated: Option<DateTime<Utc>>,
) -> QueueView {
    let cards = project(snapshot, filter);
    let stats = summarize(&cards);

    QueueView {
        shown: cards.len(),
        total: snapshot.len(),
        stats,
        cards,
        filter: filter.clone(),
        last_updated: last_updated.map(format_last_updated),
        last_updated_at: last_updated,
    }
}

pub fn format_last_updated(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
