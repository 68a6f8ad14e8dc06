use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const NO_CURRENT_PATIENT: &str = "No current patient";

// =====================================================================================
// QUEUE DATA (as delivered by the clinic API)
// =====================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Department {
    #[default]
    General,
    Cardiology,
    Pediatrics,
    Orthopedics,
    Dermatology,
    Neurology,
    Gynecology,
    Dentistry,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::General,
        Department::Cardiology,
        Department::Pediatrics,
        Department::Orthopedics,
        Department::Dermatology,
        Department::Neurology,
        Department::Gynecology,
        Department::Dentistry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::General => "general",
            Department::Cardiology => "cardiology",
            Department::Pediatrics => "pediatrics",
            Department::Orthopedics => "orthopedics",
            Department::Dermatology => "dermatology",
            Department::Neurology => "neurology",
            Department::Gynecology => "gynecology",
            Department::Dentistry => "dentistry",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::General => "General",
            Department::Cardiology => "Cardiology",
            Department::Pediatrics => "Pediatrics",
            Department::Orthopedics => "Orthopedics",
            Department::Dermatology => "Dermatology",
            Department::Neurology => "Neurology",
            Department::Gynecology => "Gynecology",
            Department::Dentistry => "Dentistry",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle))
    }
}

// The backend reports "general" for doctors without a department.
impl From<Option<String>> for Department {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().and_then(Department::parse).unwrap_or_default()
    }
}

impl From<Department> for String {
    fn from(department: Department) -> Self {
        department.as_str().to_string()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum DoctorStatus {
    #[default]
    Available,
    InSession,
    OnBreak,
}

impl DoctorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Available => "available",
            DoctorStatus::InSession => "in-session",
            DoctorStatus::OnBreak => "on-break",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoctorStatus::Available => "Available",
            DoctorStatus::InSession => "In Session",
            DoctorStatus::OnBreak => "On Break",
        }
    }
}

impl From<Option<String>> for DoctorStatus {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some("in-session") => DoctorStatus::InSession,
            Some("on-break") => DoctorStatus::OnBreak,
            _ => DoctorStatus::Available,
        }
    }
}

impl From<DoctorStatus> for String {
    fn from(status: DoctorStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum CaseKind {
    #[default]
    Normal,
    Urgent,
    FollowUp,
    /// Anything the backend sends outside the known set. Renders with no label.
    Unrecognized(String),
}

impl CaseKind {
    pub fn label(&self) -> &'static str {
        match self {
            CaseKind::Normal => "Normal",
            CaseKind::Urgent => "Urgent",
            CaseKind::FollowUp => "Follow-up",
            CaseKind::Unrecognized(_) => "",
        }
    }
}

impl From<Option<String>> for CaseKind {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => CaseKind::Normal,
            Some(value) => match value.trim() {
                "normal" => CaseKind::Normal,
                "urgent" => CaseKind::Urgent,
                "followup" => CaseKind::FollowUp,
                _ => CaseKind::Unrecognized(value),
            },
        }
    }
}

impl From<CaseKind> for String {
    fn from(kind: CaseKind) -> Self {
        match kind {
            CaseKind::Normal => "normal".to_string(),
            CaseKind::Urgent => "urgent".to_string(),
            CaseKind::FollowUp => "followup".to_string(),
            CaseKind::Unrecognized(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPatient {
    #[serde(default, deserialize_with = "flexible_string")]
    pub number: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub name: String,
    #[serde(rename = "case", default)]
    pub case_kind: CaseKind,
    #[serde(default, deserialize_with = "flexible_string")]
    pub time: String,
}

/// Same shape as the current patient; only the length of the waiting list is displayed.
pub type WaitingPatient = CurrentPatient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorQueueEntry {
    #[serde(rename = "doctor_id", alias = "id", deserialize_with = "flexible_string")]
    pub doctor_id: String,
    #[serde(rename = "doctor_name", alias = "name", default, deserialize_with = "flexible_string")]
    pub doctor_name: String,
    #[serde(rename = "doctor_specialty", alias = "specialty", default, deserialize_with = "flexible_string")]
    pub specialty: String,
    #[serde(default)]
    pub department: Department,
    #[serde(default)]
    pub status: DoctorStatus,
    #[serde(rename = "currentPatient", default)]
    pub current_patient: Option<CurrentPatient>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub waiting: Vec<WaitingPatient>,
    #[serde(rename = "avgTime", default, deserialize_with = "null_as_zero")]
    pub average_wait_minutes: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueListResponse {
    pub queues: Vec<DoctorQueueEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallNextResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CallNextResponse {
    /// Older backends reply with the refreshed queue list and no `success` flag.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }

    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "The clinic refused to call the next patient".to_string())
    }
}

/// Full copy of the queue data as of the last successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueSnapshot {
    entries: Vec<DoctorQueueEntry>,
}

impl QueueSnapshot {
    pub fn new(entries: Vec<DoctorQueueEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DoctorQueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =====================================================================================
// FILTERING
// =====================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(Department),
}

impl DepartmentFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentFilter::All => "all",
            DepartmentFilter::Only(department) => department.as_str(),
        }
    }
}

impl FromStr for DepartmentFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(DepartmentFilter::All);
        }
        Department::parse(trimmed)
            .map(DepartmentFilter::Only)
            .ok_or_else(|| format!("Unknown department: {}", trimmed))
    }
}

impl Serialize for DepartmentFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DepartmentFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.as_deref()
            .unwrap_or("all")
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub department: DepartmentFilter,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn new(department: DepartmentFilter, search: impl Into<String>) -> Self {
        Self {
            department,
            search: search.into(),
        }
    }
}

// =====================================================================================
// VIEW MODEL
// =====================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPatientCard {
    pub number: String,
    pub name: String,
    pub case_label: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCard {
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub department: Department,
    pub department_label: String,
    pub status: DoctorStatus,
    pub status_label: String,
    pub current_patient: Option<CurrentPatientCard>,
    pub current_patient_label: String,
    pub waiting_count: usize,
    pub average_wait_minutes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueueStats {
    pub available: usize,
    pub in_session: usize,
    pub on_break: usize,
    pub total_waiting: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueueView {
    pub cards: Vec<DoctorCard>,
    pub filter: FilterState,
    pub shown: usize,
    pub total: usize,
    pub stats: QueueStats,
    pub last_updated: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

// =====================================================================================
// NOTICES
// =====================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// =====================================================================================
// CLOCK & NOW SERVING
// =====================================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClockReading {
    pub time: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingPatient {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "flexible_string")]
    pub doctor_name: String,
    #[serde(rename = "wait_time", default)]
    pub wait_minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NowServing {
    #[serde(default)]
    pub current: Option<ServingPatient>,
    #[serde(default)]
    pub next: Option<ServingPatient>,
}

// =====================================================================================
// SERDE HELPERS
// =====================================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Accepts strings, numbers or null; the backend is not consistent about ids and queue numbers.
fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Text(s)) => s,
        Some(RawText::Integer(n)) => n.to_string(),
        Some(RawText::Float(n)) => n.to_string(),
        Some(RawText::Flag(b)) => b.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
