//! Admin dashboard routes.

use axum::{Json, extract::State};

use crate::db::dashboard::{DashboardRepository, DashboardStats};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Store-wide counters and revenue.
///
/// GET /api/dashboard/stats (admin)
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardStats>> {
    let stats = DashboardRepository::new(state.pool()).stats().await?;
    Ok(Json(stats))
}
