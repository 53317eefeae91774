//! Delivery-location routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use mealdrop_core::LocationId;

use crate::db::catalog::{LocationRepository, LocationUpdate};
use crate::error::Result;
use crate::middleware::{RequireAdmin, RequireUser};
use crate::models::Location;
use crate::state::AppState;

/// Request body for saving a delivery location.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub additional_info: Option<String>,
}

/// Request body for updating a location; omitted fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub additional_info: Option<String>,
}

/// List every saved delivery location.
///
/// GET /locations (admin)
///
/// # Errors
///
/// 403 without admin privilege.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Location>>> {
    let rows = LocationRepository::new(state.pool()).list_all().await?;
    Ok(Json(rows))
}

/// List the caller's saved delivery locations.
///
/// GET /locations/mine
///
/// # Errors
///
/// 401 without a valid bearer token.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Location>>> {
    let rows = LocationRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(rows))
}

/// Save a delivery location for the caller.
///
/// POST /locations
///
/// # Errors
///
/// 401 without a valid bearer token.
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>)> {
    let row = LocationRepository::new(state.pool())
        .create(
            user.id,
            &req.name,
            &req.latitude,
            &req.longitude,
            req.additional_info.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Update one of the caller's saved locations.
///
/// PUT /locations/mine/{id}
///
/// # Errors
///
/// 404 if the location doesn't exist or belongs to another user.
pub async fn update_mine(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<LocationId>,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<Location>> {
    let row = LocationRepository::new(state.pool())
        .update(
            id,
            user.id,
            &LocationUpdate {
                name: req.name.as_deref(),
                latitude: req.latitude.as_deref(),
                longitude: req.longitude.as_deref(),
                additional_info: req.additional_info.as_deref(),
            },
        )
        .await?;

    Ok(Json(row))
}

/// Delete one of the caller's saved locations.
///
/// DELETE /locations/mine/{id}
///
/// # Errors
///
/// 404 if the location doesn't exist or belongs to another user, 409 if an
/// order still references it.
pub async fn delete_mine(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<LocationId>,
) -> Result<StatusCode> {
    LocationRepository::new(state.pool())
        .delete(id, user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
