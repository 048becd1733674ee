//! Health check routes.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// Liveness check: the process is up and serving.
///
/// GET /health
pub async fn liveness() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// Readiness check: the database answers a trivial query.
///
/// GET /health/ready
pub async fn readiness(State(state): State<AppState>) -> Result<Json<HealthStatus>> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.pool())
        .await
        .map_err(|e| AppError::Internal(format!("database unreachable: {e}")))?;

    Ok(Json(HealthStatus { status: "ok" }))
}
