//! Food catalog routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use mealdrop_core::{FoodId, Price, RestaurantId};

use crate::db::catalog::{FoodRepository, FoodUpdate};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Food;
use crate::state::AppState;

/// Request body for creating a food.
#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub restaurant_id: RestaurantId,
    pub price: Price,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Request body for updating a food; omitted fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateFoodRequest {
    pub name: Option<String>,
    pub restaurant_id: Option<RestaurantId>,
    pub price: Option<Price>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// List every food in the catalog.
///
/// GET /foods
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Food>>> {
    let rows = FoodRepository::new(state.pool()).list().await?;
    Ok(Json(rows))
}

/// Search foods by name substring, case-insensitively.
///
/// GET /foods/search/{term}
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn search(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Vec<Food>>> {
    let rows = FoodRepository::new(state.pool()).search(&term).await?;
    Ok(Json(rows))
}

/// List the foods offered by one restaurant.
///
/// GET /restaurants/{id}/foods
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn list_by_restaurant(
    State(state): State<AppState>,
    Path(id): Path<RestaurantId>,
) -> Result<Json<Vec<Food>>> {
    let rows = FoodRepository::new(state.pool())
        .list_by_restaurant(id)
        .await?;
    Ok(Json(rows))
}

/// Create a food.
///
/// POST /foods (admin)
///
/// # Errors
///
/// 403 without admin privilege.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<Food>)> {
    let row = FoodRepository::new(state.pool())
        .create(
            &req.name,
            req.restaurant_id,
            req.price,
            req.description.as_deref(),
            req.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Update a food.
///
/// PUT /foods/{id} (admin)
///
/// # Errors
///
/// 403 without admin privilege, 404 for an unknown food.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<FoodId>,
    Json(req): Json<UpdateFoodRequest>,
) -> Result<Json<Food>> {
    let row = FoodRepository::new(state.pool())
        .update(
            id,
            &FoodUpdate {
                name: req.name.as_deref(),
                restaurant_id: req.restaurant_id,
                price: req.price,
                description: req.description.as_deref(),
                image: req.image.as_deref(),
            },
        )
        .await?;

    Ok(Json(row))
}

/// Delete a food.
///
/// DELETE /foods/{id} (admin)
///
/// # Errors
///
/// 403 without admin privilege, 404 for an unknown food.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<FoodId>,
) -> Result<StatusCode> {
    FoodRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
