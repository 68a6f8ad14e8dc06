use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use queue_display_cell::{create_queue_display_router, QueueDisplayRuntime};

pub fn create_router(runtime: Arc<QueueDisplayRuntime>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic queue display is running!" }))
        .nest("/api", create_queue_display_router(runtime))
}
