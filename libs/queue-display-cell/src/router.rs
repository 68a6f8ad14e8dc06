use std::sync::Arc;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers::{
    get_queue_view,
    set_queue_filter,
    refresh_queues,
    call_next_patient,
    get_active_notices,
    dismiss_notice,
    get_clock,
    get_now_serving,
    health_check,
};
use crate::QueueDisplayRuntime;

pub fn create_queue_display_router(runtime: Arc<QueueDisplayRuntime>) -> Router {
    Router::new()
        .route("/queues", get(get_queue_view))
        .route("/queues/filter", put(set_queue_filter))
        .route("/queues/refresh", post(refresh_queues))
        .route("/queues/{doctor_id}/call-next", post(call_next_patient))
        .route("/notices", get(get_active_notices))
        .route("/notices/{notice_id}", delete(dismiss_notice))
        .route("/clock", get(get_clock))
        .route("/now-serving", get(get_now_serving))
        .route("/health", get(health_check))
        .with_state(runtime)
}
