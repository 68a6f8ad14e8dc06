use tokio::sync::watch;
use tracing::{debug, info};

use queue_display_cell::{NoticeLevel, QueueView};
use queue_display_cell::services::notice::NoticeReceiver;

/// Logs every re-rendered board. Stands in for a display surface when the
/// service runs headless.
pub async fn log_board_updates(mut views: watch::Receiver<QueueView>) {
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();

        info!(
            "Queue board: {}/{} doctors shown, {} waiting (updated {})",
            view.shown,
            view.total,
            view.stats.total_waiting,
            view.last_updated.as_deref().unwrap_or("never"),
        );

        for card in &view.cards {
            debug!(
                "  [{}] {} ({}, {}) now: {} | waiting: {}",
                card.status_label,
                card.doctor_name,
                card.specialty,
                card.department_label,
                card.current_patient_label,
                card.waiting_count,
            );
        }
    }
}

pub async fn log_notices(mut notices: NoticeReceiver) {
    loop {
        match notices.recv().await {
            Ok(notice) => match notice.level {
                NoticeLevel::Error => tracing::warn!("Notice: {} - {}", notice.title, notice.message),
                _ => info!("Notice: {} - {}", notice.title, notice.message),
            },
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                debug!("Notice log lagged, skipped {}", skipped);
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}
