#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use queue_display_cell::*;
use shared_utils::test_utils::MockClinicResponses;

/// In-memory stand-in for the clinic API that counts every call.
pub struct FakeQueueSource {
    entries: Mutex<Vec<DoctorQueueEntry>>,
    fail_fetch: AtomicBool,
    refuse_call_next: AtomicBool,
    fetch_count: AtomicUsize,
    now_serving_count: AtomicUsize,
    called: Mutex<Vec<String>>,
}

impl FakeQueueSource {
    pub fn new(entries: Vec<DoctorQueueEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            fail_fetch: AtomicBool::new(false),
            refuse_call_next: AtomicBool::new(false),
            fetch_count: AtomicUsize::new(0),
            now_serving_count: AtomicUsize::new(0),
            called: Mutex::new(Vec::new()),
        }
    }

    pub fn with_sample_queues() -> Self {
        Self::new(sample_entries())
    }

    pub fn set_entries(&self, entries: Vec<DoctorQueueEntry>) {
        *self.entries.lock().unwrap() = entries;
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn refuse_call_next(&self, refuse: bool) {
        self.refuse_call_next.store(refuse, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn now_serving_count(&self) -> usize {
        self.now_serving_count.load(Ordering::SeqCst)
    }

    pub fn called_doctors(&self) -> Vec<String> {
        self.called.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueSource for FakeQueueSource {
    async fn fetch_queues(&self) -> Result<Vec<DoctorQueueEntry>, QueueDisplayError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(QueueDisplayError::Network("connection refused".to_string()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn call_next(&self, doctor_id: &str) -> Result<(), QueueDisplayError> {
        if self.refuse_call_next.load(Ordering::SeqCst) {
            return Err(QueueDisplayError::Command("No patients waiting".to_string()));
        }
        self.called.lock().unwrap().push(doctor_id.to_string());
        Ok(())
    }

    async fn fetch_now_serving(&self) -> Result<NowServing, QueueDisplayError> {
        self.now_serving_count.fetch_add(1, Ordering::SeqCst);
        let body = MockClinicResponses::now_serving(Some(3), Some(4));
        serde_json::from_value(body).map_err(|e| QueueDisplayError::Decode(e.to_string()))
    }
}

pub fn entries_from(list: Value) -> Vec<DoctorQueueEntry> {
    let response: QueueListResponse =
        serde_json::from_value(list).expect("fixture should decode");
    response.queues
}

pub fn sample_entries() -> Vec<DoctorQueueEntry> {
    entries_from(MockClinicResponses::sample_queue_list())
}

pub fn doctor_names(view: &QueueView) -> Vec<String> {
    view.cards.iter().map(|c| c.doctor_name.clone()).collect()
}
