use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use shared_config::AppConfig;

use crate::services::{
    clock::ClockService,
    controller::QueueRefreshController,
    notice::NoticeService,
    now_serving::NowServingMonitor,
    scheduler::ScheduledTask,
    source::{HttpQueueSource, QueueSource},
};

/// Everything the queue display needs while it is up: the controller, the
/// notices it raises, the clock and the now-serving monitor, plus the
/// scheduled tasks that keep them fresh.
pub struct QueueDisplayRuntime {
    config: Arc<AppConfig>,
    controller: Arc<QueueRefreshController>,
    notices: Arc<NoticeService>,
    clock: Arc<ClockService>,
    now_serving: Arc<NowServingMonitor>,
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl QueueDisplayRuntime {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let source: Arc<dyn QueueSource> = Arc::new(HttpQueueSource::new(&config));
        Self::with_source(config, source)
    }

    pub fn with_source(config: Arc<AppConfig>, source: Arc<dyn QueueSource>) -> Self {
        let notices = Arc::new(NoticeService::new(config.notice_display_duration()));
        let controller = Arc::new(QueueRefreshController::new(source.clone(), notices.clone()));

        Self {
            controller,
            notices,
            clock: Arc::new(ClockService::new()),
            now_serving: Arc::new(NowServingMonitor::new(source)),
            tasks: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Spawns the clock, queue-refresh and now-serving tasks. A second call is a no-op.
    #[instrument(skip(self))]
    pub async fn start(&self) {
        let mut tasks = self.tasks.lock().await;
        if !tasks.is_empty() {
            return;
        }

        let clock = self.clock.clone();
        tasks.push(ScheduledTask::spawn("clock", self.config.clock_tick(), move || {
            let clock = clock.clone();
            async move {
                clock.tick();
            }
        }));

        let controller = self.controller.clone();
        tasks.push(ScheduledTask::spawn(
            "queue-refresh",
            self.config.queue_refresh_interval(),
            move || {
                let controller = controller.clone();
                async move {
                    // Failures are reported by the controller itself.
                    let _ = controller.refresh().await;
                }
            },
        ));

        let now_serving = self.now_serving.clone();
        tasks.push(ScheduledTask::spawn(
            "now-serving",
            self.config.now_serving_refresh_interval(),
            move || {
                let now_serving = now_serving.clone();
                async move {
                    let _ = now_serving.refresh().await;
                }
            },
        ));

        info!(
            "Queue display started (refresh every {}s)",
            self.config.queue_refresh_interval().as_secs()
        );
    }

    #[instrument(skip(self))]
    pub async fn stop(&self) {
        let tasks: Vec<ScheduledTask> = self.tasks.lock().await.drain(..).collect();
        if tasks.is_empty() {
            return;
        }

        futures::future::join_all(tasks.into_iter().map(ScheduledTask::stop)).await;
        info!("Queue display stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.tasks.lock().await.iter().any(ScheduledTask::is_running)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn controller(&self) -> &Arc<QueueRefreshController> {
        &self.controller
    }

    pub fn notices(&self) -> &Arc<NoticeService> {
        &self.notices
    }

    pub fn clock(&self) -> &Arc<ClockService> {
        &self.clock
    }

    pub fn now_serving(&self) -> &Arc<NowServingMonitor> {
        &self.now_serving
    }
}
