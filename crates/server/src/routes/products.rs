//! Product routes: public catalog reads plus the admin CRUD surface.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use lamore_core::{CategoryId, Price, ProductId};

use crate::db::categories::CategoryRepository;
use crate::db::products::{NewProduct, ProductFilters, ProductPatch, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category_id: Option<CategoryId>,
    pub search: Option<String>,
    /// When omitted, no active filter is applied; storefront clients pass
    /// `activeOnly=true` to hide retired products.
    #[serde(default)]
    pub active_only: bool,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Minor currency units (centavos).
    pub price: Price,
    pub category_id: CategoryId,
    pub stock: i32,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Request body for updating a product; absent fields are left unchanged.
///
/// A `null` body value is indistinguishable from an absent field, so
/// `description` and `imageUrl` can be replaced but not cleared here.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<CategoryId>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

/// Request body for a base64 image upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    /// MIME type of the payload, e.g. `image/png`.
    pub content_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// Response to a successful image upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub url: String,
}

/// List products, newest first.
///
/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filters = ProductFilters {
        category_id: query.category_id,
        search: query.search,
        active_only: query.active_only,
    };

    let products = ProductRepository::new(state.pool()).list(&filters).await?;
    Ok(Json(products))
}

/// Get one product by ID.
///
/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Get one product by slug.
///
/// GET /api/products/slug/{slug}
pub async fn show_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product '{slug}'")))?;

    Ok(Json(product))
}

/// Create a product.
///
/// POST /api/products (admin)
#[tracing::instrument(skip_all, fields(slug = %req.slug))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    validate_product_input(&req.name, &req.slug, req.price, req.stock)?;

    // The category must exist; a bad FK would otherwise surface as INTERNAL.
    CategoryRepository::new(state.pool())
        .get_by_id(req.category_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("unknown category {}", req.category_id)))?;

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name: req.name,
            slug: req.slug,
            description: req.description,
            price: req.price,
            category_id: req.category_id,
            stock: req.stock,
            image_url: req.image_url,
            active: req.active,
        })
        .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product.
///
/// PUT /api/products/{id} (admin)
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    if let Some(price) = req.price
        && price < Price::ZERO
    {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }
    if let Some(stock) = req.stock
        && stock < 0
    {
        return Err(AppError::BadRequest("stock must not be negative".to_owned()));
    }

    if let Some(category_id) = req.category_id {
        CategoryRepository::new(state.pool())
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("unknown category {category_id}")))?;
    }

    let product = ProductRepository::new(state.pool())
        .update(
            id,
            &ProductPatch {
                name: req.name,
                slug: req.slug,
                description: req.description,
                price: req.price,
                category_id: req.category_id,
                stock: req.stock,
                image_url: req.image_url,
                active: req.active,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/products/{id} (admin)
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    tracing::info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Store a base64-encoded product image and return its public URL.
///
/// POST /api/products/image (admin)
#[tracing::instrument(skip_all)]
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<UploadImageRequest>,
) -> Result<(StatusCode, Json<UploadImageResponse>)> {
    let bytes = BASE64
        .decode(req.data.as_bytes())
        .map_err(|e| AppError::BadRequest(format!("invalid base64 payload: {e}")))?;

    let url = state
        .media()
        .put_product_image(&req.content_type, &bytes)
        .await
        .map_err(|e| match e {
            crate::services::media::MediaError::Io(_) => AppError::Media(e),
            other => AppError::BadRequest(other.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(UploadImageResponse { url })))
}

fn validate_product_input(name: &str, slug: &str, price: Price, stock: i32) -> Result<()> {
    if name.trim().is_empty() || slug.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and slug must not be empty".to_owned(),
        ));
    }
    if price < Price::ZERO {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }
    if stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".to_owned()));
    }
    Ok(())
}
