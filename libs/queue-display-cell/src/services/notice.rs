// =====================================================================================
// TRANSIENT NOTICES
// =====================================================================================

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::{Notice, NoticeLevel};

pub type NoticeReceiver = broadcast::Receiver<Notice>;

/// Short-lived operator notices. Each notice disappears on its own once its
/// display time has passed; subscribers see every notice as it is pushed.
pub struct NoticeService {
    display_for: chrono::Duration,
    active: RwLock<Vec<Notice>>,
    sender: broadcast::Sender<Notice>,
}

impl NoticeService {
    pub fn new(display_for: Duration) -> Self {
        let (sender, _) = broadcast::channel(100);

        Self {
            display_for: chrono::Duration::from_std(display_for)
                .unwrap_or_else(|_| chrono::Duration::seconds(5)),
            active: RwLock::new(Vec::new()),
            sender,
        }
    }

    pub async fn push(
        &self,
        level: NoticeLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Notice {
        let created_at = Utc::now();
        let notice = Notice {
            id: Uuid::new_v4(),
            level,
            title: title.into(),
            message: message.into(),
            created_at,
            expires_at: created_at + self.display_for,
        };

        {
            let mut active = self.active.write().await;
            active.retain(|n| !n.is_expired_at(created_at));
            active.push(notice.clone());
        }

        // No subscribers is fine; the notice is still listed until it expires.
        if self.sender.send(notice.clone()).is_err() {
            debug!("No notice subscribers for {:?}", notice.title);
        }

        notice
    }

    pub async fn success(&self, title: impl Into<String>, message: impl Into<String>) -> Notice {
        self.push(NoticeLevel::Success, title, message).await
    }

    pub async fn error(&self, title: impl Into<String>, message: impl Into<String>) -> Notice {
        self.push(NoticeLevel::Error, title, message).await
    }

    /// Unexpired notices, oldest first.
    pub async fn active(&self) -> Vec<Notice> {
        let now = Utc::now();
        let mut active = self.active.write().await;
        active.retain(|n| !n.is_expired_at(now));
        active.clone()
    }

    pub async fn dismiss(&self, notice_id: Uuid) -> bool {
        let mut active = self.active.write().await;
        let before = active.len();
        active.retain(|n| n.id != notice_id);
        active.len() != before
    }

    pub fn subscribe(&self) -> NoticeReceiver {
        self.sender.subscribe()
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
