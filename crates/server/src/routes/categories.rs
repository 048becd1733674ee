//! Category routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use lamore_core::CategoryId;

use crate::db::categories::{CategoryRepository, NewCategory};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Category;
use crate::state::AppState;

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// List all categories, name-ordered.
///
/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Get one category.
///
/// GET /api/categories/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(Json(category))
}

/// Create a category.
///
/// POST /api/categories (admin)
#[tracing::instrument(skip_all, fields(slug = %req.slug))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    if req.name.trim().is_empty() || req.slug.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and slug must not be empty".to_owned(),
        ));
    }

    let category = CategoryRepository::new(state.pool())
        .create(&NewCategory {
            name: req.name,
            slug: req.slug,
            description: req.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}
