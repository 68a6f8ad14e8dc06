use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::{
    ClockReading, DepartmentFilter, Notice, QueueDisplayError, QueueDisplayRuntime, QueueView,
};

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Current rendered queue board
pub async fn get_queue_view(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
) -> Json<QueueView> {
    Json(runtime.controller().view())
}

/// Change the department/search filter and return the re-rendered board
pub async fn set_queue_filter(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<QueueView>, AppError> {
    let department: DepartmentFilter = request
        .department
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(AppError::ValidationError)?;
    let search = request.search.unwrap_or_default();

    let view = runtime.controller().set_filter(department, &search).await;
    Ok(Json(view))
}

pub async fn refresh_queues(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
) -> Result<Json<QueueView>, AppError> {
    let view = runtime
        .controller()
        .refresh()
        .await
        .map_err(to_app_error)?;
    Ok(Json(view))
}

/// Advance a doctor's queue to the next waiting patient
pub async fn call_next_patient(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!("Call next requested for doctor {}", doctor_id);

    runtime
        .controller()
        .call_next(&doctor_id)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "success": true,
        "doctor_id": doctor_id,
        "view": runtime.controller().view(),
    })))
}

pub async fn get_active_notices(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
) -> Json<Vec<Notice>> {
    Json(runtime.notices().active().await)
}

pub async fn dismiss_notice(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
    Path(notice_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if runtime.notices().dismiss(notice_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Notice {} not found", notice_id)))
    }
}

pub async fn get_clock(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
) -> Json<ClockReading> {
    Json(runtime.clock().current())
}

pub async fn get_now_serving(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
) -> Json<Value> {
    match runtime.now_serving().latest().await {
        Some(now_serving) => Json(json!({
            "available": true,
            "current": now_serving.current,
            "next": now_serving.next,
        })),
        None => Json(json!({
            "available": false,
            "current": null,
            "next": null,
        })),
    }
}

pub async fn health_check(
    State(runtime): State<Arc<QueueDisplayRuntime>>,
) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "running": runtime.is_running().await,
        "configured": runtime.config().is_configured(),
    }))
}

fn to_app_error(err: QueueDisplayError) -> AppError {
    match err {
        QueueDisplayError::Network(msg) => AppError::ExternalService(msg),
        QueueDisplayError::Decode(msg) => AppError::ExternalService(msg),
        QueueDisplayError::Command(msg) => AppError::Conflict(msg),
    }
}
