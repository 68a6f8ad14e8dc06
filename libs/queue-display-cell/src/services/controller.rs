use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info, instrument, warn};

use crate::services::{notice::NoticeService, projection::render_view, source::QueueSource};
use crate::{DepartmentFilter, FilterState, QueueDisplayError, QueueSnapshot, QueueView};

#[derive(Default)]
struct ControllerState {
    snapshot: QueueSnapshot,
    filter: FilterState,
    last_updated: Option<DateTime<Utc>>,
}

/// Owns the doctor-queue snapshot and the operator's filter.
///
/// `refresh`, `set_filter` and `call_next` are the only mutators. Every
/// mutation re-renders the full view from the snapshot and publishes it to
/// subscribers. Refresh responses are applied in completion order, so a slow
/// response can overwrite a newer one.
pub struct QueueRefreshController {
    source: Arc<dyn QueueSource>,
    notices: Arc<NoticeService>,
    state: RwLock<ControllerState>,
    view_tx: watch::Sender<QueueView>,
}

impl QueueRefreshController {
    pub fn new(source: Arc<dyn QueueSource>, notices: Arc<NoticeService>) -> Self {
        let (view_tx, _) = watch::channel(QueueView::default());

        Self {
            source,
            notices,
            state: RwLock::new(ControllerState::default()),
            view_tx,
        }
    }

    /// Replaces the snapshot with a fresh fetch. On failure the previous
    /// snapshot stays in place and a single notice is raised; the next
    /// scheduled tick is the retry.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<QueueView, QueueDisplayError> {
        let entries = match self.source.fetch_queues().await {
            Ok(entries) => entries,
            Err(e) => {
                self.report_failure("refresh", &e).await;
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        state.snapshot = QueueSnapshot::new(entries);
        state.last_updated = Some(Utc::now());
        let view = self.publish(&state);

        debug!("Queue snapshot refreshed: {} doctors, {} shown", view.total, view.shown);
        Ok(view)
    }

    /// Applies a new filter to the snapshot already in memory. Never touches the network.
    #[instrument(skip(self))]
    pub async fn set_filter(&self, department: DepartmentFilter, search: &str) -> QueueView {
        let mut state = self.state.write().await;
        state.filter = FilterState::new(department, search);
        self.publish(&state)
    }

    /// Advances a doctor's queue, then refreshes out of band. The view only
    /// changes once that refresh lands; nothing is assumed in between.
    #[instrument(skip(self))]
    pub async fn call_next(&self, doctor_id: &str) -> Result<(), QueueDisplayError> {
        if let Err(e) = self.source.call_next(doctor_id).await {
            self.report_failure("call next", &e).await;
            return Err(e);
        }

        info!("Called next patient for doctor {}", doctor_id);
        self.notices
            .success("Patient called", format!("Next patient called for doctor {}", doctor_id))
            .await;

        // A failed follow-up refresh has already been reported on its own.
        if self.refresh().await.is_err() {
            warn!("Refresh after call next failed for doctor {}", doctor_id);
        }

        Ok(())
    }

    pub fn view(&self) -> QueueView {
        self.view_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueueView> {
        self.view_tx.subscribe()
    }

    pub async fn filter(&self) -> FilterState {
        self.state.read().await.filter.clone()
    }

    pub async fn snapshot(&self) -> QueueSnapshot {
        self.state.read().await.snapshot.clone()
    }

    fn publish(&self, state: &ControllerState) -> QueueView {
        let view = render_view(&state.snapshot, &state.filter, state.last_updated);
        self.view_tx.send_replace(view.clone());
        view
    }

    async fn report_failure(&self, operation: &str, err: &QueueDisplayError) {
        error!("Queue {} failed: {}", operation, err);
        self.notices.error(err.notice_title(), err.to_string()).await;
    }
}
