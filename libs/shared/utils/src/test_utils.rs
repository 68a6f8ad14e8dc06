use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub clinic_base_url: String,
    pub csrf_token: String,
    pub session_id: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            clinic_base_url: "http://localhost:8000".to_string(),
            csrf_token: "test-csrf-token".to_string(),
            session_id: None,
        }
    }
}

impl TestConfig {
    /// Config pointed at a mock clinic server.
    pub fn for_server(base_url: &str) -> Self {
        Self {
            clinic_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            clinic_base_url: self.clinic_base_url.clone(),
            csrf_token: self.csrf_token.clone(),
            session_id: self.session_id.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// JSON bodies shaped like the clinic backend's queue endpoints.
pub struct MockClinicResponses;

impl MockClinicResponses {
    pub fn queue_entry(
        doctor_id: u32,
        name: &str,
        specialty: &str,
        department: &str,
        status: &str,
    ) -> Value {
        json!({
            "doctor_id": doctor_id,
            "doctor_name": name,
            "doctor_specialty": specialty,
            "status": status,
            "currentPatient": {
                "number": format!("P-{:03}", doctor_id),
                "name": "Sara Ahmed",
                "case": "normal",
                "time": "09:30"
            },
            "waiting": [
                { "number": "P-010", "name": "Omar Hassan", "case": "urgent", "time": "09:45" },
                { "number": "P-011", "name": "Lina Karim", "case": "followup", "time": "10:00" }
            ],
            "avgTime": 15,
            "department": department
        })
    }

    /// A doctor with nobody booked today: no current patient, no waiting list.
    pub fn idle_queue_entry(doctor_id: u32, name: &str, specialty: &str, department: &str) -> Value {
        json!({
            "doctor_id": doctor_id,
            "doctor_name": name,
            "doctor_specialty": specialty,
            "status": "on-break",
            "currentPatient": null,
            "avgTime": 15,
            "department": department
        })
    }

    pub fn queue_list(entries: Vec<Value>) -> Value {
        json!({ "queues": entries })
    }

    /// Three cardiology/pediatrics/general doctors, one of them idle.
    pub fn sample_queue_list() -> Value {
        Self::queue_list(vec![
            Self::queue_entry(1, "Dr. Karen Lee", "Cardiologist", "cardiology", "in-session"),
            Self::queue_entry(2, "Dr. Ahmed Ali", "Pediatrician", "pediatrics", "available"),
            Self::idle_queue_entry(3, "Dr. Noor Saleh", "Family Medicine", "general"),
            Self::queue_entry(4, "Dr. Rami Fleet", "Heart Surgeon", "cardiology", "available"),
        ])
    }

    pub fn call_next_success() -> Value {
        json!({ "success": true })
    }

    pub fn call_next_refused(reason: &str) -> Value {
        json!({ "success": false, "error": reason })
    }

    pub fn now_serving(current: Option<u32>, next: Option<u32>) -> Value {
        let patient = |number: u32, name: &str| json!({
            "number": number,
            "name": name,
            "type": "Dr. Karen Lee",
            "wait_time": 12
        });

        json!({
            "current": current.map(|n| patient(n, "Sara Ahmed")),
            "next": next.map(|n| patient(n, "Omar Hassan")),
        })
    }
}
