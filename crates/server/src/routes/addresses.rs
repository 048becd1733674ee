//! Address routes, scoped to the authenticated caller.
//!
//! Another user's address is reported as `NOT_FOUND`, never `FORBIDDEN`,
//! so callers cannot probe which IDs exist.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use lamore_core::AddressId;

use crate::db::addresses::{AddressPatch, AddressRepository, NewAddress};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Address;
use crate::state::AppState;

/// Request body for creating an address.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub recipient_name: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Request body for updating an address; absent fields are left unchanged.
///
/// A `null` body value is indistinguishable from an absent field, so
/// `complement` can be replaced but not cleared here.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    pub recipient_name: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub is_default: Option<bool>,
}

/// List the caller's addresses, default first.
///
/// GET /api/addresses
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(addresses))
}

/// Get one of the caller's addresses.
///
/// GET /api/addresses/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<Json<Address>> {
    let address = owned_address(&state, &user, id).await?;
    Ok(Json(address))
}

/// Create an address for the caller.
///
/// POST /api/addresses
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<Address>)> {
    validate_state_code(&req.state)?;

    let address = AddressRepository::new(state.pool())
        .create(&NewAddress {
            user_id: user.id,
            recipient_name: req.recipient_name,
            street: req.street,
            number: req.number,
            complement: req.complement,
            neighborhood: req.neighborhood,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            is_default: req.is_default,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// Partially update one of the caller's addresses.
///
/// PUT /api/addresses/{id}
#[tracing::instrument(skip_all, fields(user_id = %user.id, address_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<AddressId>,
    Json(req): Json<UpdateAddressRequest>,
) -> Result<Json<Address>> {
    if let Some(s) = req.state.as_deref() {
        validate_state_code(s)?;
    }

    // Ownership check before any write
    owned_address(&state, &user, id).await?;

    let address = AddressRepository::new(state.pool())
        .update(
            id,
            user.id,
            &AddressPatch {
                recipient_name: req.recipient_name,
                street: req.street,
                number: req.number,
                complement: req.complement,
                neighborhood: req.neighborhood,
                city: req.city,
                state: req.state,
                zip_code: req.zip_code,
                is_default: req.is_default,
            },
        )
        .await?;

    Ok(Json(address))
}

/// Delete one of the caller's addresses.
///
/// DELETE /api/addresses/{id}
#[tracing::instrument(skip_all, fields(user_id = %user.id, address_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    owned_address(&state, &user, id).await?;

    AddressRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch an address and verify the caller owns it.
async fn owned_address(
    state: &AppState,
    user: &crate::models::CurrentUser,
    id: AddressId,
) -> Result<Address> {
    AddressRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .filter(|a| a.is_owned_by(user.id))
        .ok_or_else(|| AppError::NotFound(format!("address {id}")))
}

fn validate_state_code(state: &str) -> Result<()> {
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest(
            "state must be a two-letter code".to_owned(),
        ));
    }
    Ok(())
}
