//! Restaurant catalog routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use mealdrop_core::RestaurantId;

use crate::db::catalog::{RestaurantRepository, RestaurantUpdate};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Restaurant;
use crate::state::AppState;

/// Request body for creating a restaurant.
#[derive(Debug, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub about: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

/// Request body for updating a restaurant; omitted fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub about: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

/// List every restaurant.
///
/// GET /restaurants
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Restaurant>>> {
    let rows = RestaurantRepository::new(state.pool()).list().await?;
    Ok(Json(rows))
}

/// Create a restaurant.
///
/// POST /restaurants (admin)
///
/// # Errors
///
/// 403 without admin privilege.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<Restaurant>)> {
    let row = RestaurantRepository::new(state.pool())
        .create(
            &req.name,
            req.about.as_deref(),
            req.location.as_deref(),
            req.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Update a restaurant.
///
/// PUT /restaurants/{id} (admin)
///
/// # Errors
///
/// 403 without admin privilege, 404 for an unknown restaurant.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<RestaurantId>,
    Json(req): Json<UpdateRestaurantRequest>,
) -> Result<Json<Restaurant>> {
    let row = RestaurantRepository::new(state.pool())
        .update(
            id,
            &RestaurantUpdate {
                name: req.name.as_deref(),
                about: req.about.as_deref(),
                location: req.location.as_deref(),
                image: req.image.as_deref(),
            },
        )
        .await?;

    Ok(Json(row))
}

/// Delete a restaurant and its foods.
///
/// DELETE /restaurants/{id} (admin)
///
/// # Errors
///
/// 403 without admin privilege, 404 for an unknown restaurant.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<RestaurantId>,
) -> Result<StatusCode> {
    RestaurantRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
