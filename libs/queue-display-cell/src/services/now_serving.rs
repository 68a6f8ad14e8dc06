use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::services::source::QueueSource;
use crate::{NowServing, QueueDisplayError};

/// Keeps the secretary's "now serving / up next" reading current.
///
/// Failures only log; the last good reading stays on screen.
pub struct NowServingMonitor {
    source: Arc<dyn QueueSource>,
    latest: RwLock<Option<NowServing>>,
}

impl NowServingMonitor {
    pub fn new(source: Arc<dyn QueueSource>) -> Self {
        Self {
            source,
            latest: RwLock::new(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<NowServing, QueueDisplayError> {
        match self.source.fetch_now_serving().await {
            Ok(now_serving) => {
                debug!(
                    "Now serving {:?}, next {:?}",
                    now_serving.current.as_ref().and_then(|p| p.number),
                    now_serving.next.as_ref().and_then(|p| p.number),
                );
                *self.latest.write().await = Some(now_serving.clone());
                Ok(now_serving)
            }
            Err(e) => {
                warn!("Now-serving refresh failed, keeping last reading: {}", e);
                Err(e)
            }
        }
    }

    pub async fn latest(&self) -> Option<NowServing> {
        self.latest.read().await.clone()
    }
}
