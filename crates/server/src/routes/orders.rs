//! Order routes: basket aggregation, delivery lifecycle, and status.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use mealdrop_core::{DeliveryStatus, FoodId, LocationId, OrderId, Price};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireUser};
use crate::models::{NewLineItem, Order};
use crate::state::AppState;

const fn default_quantity() -> i32 {
    1
}

/// Request body for `POST /orders/{location_id}`.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub food_id: FoodId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub price: Price,
}

/// Response for a basket add; identical whether the basket was created or
/// amended.
#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub status: &'static str,
    pub id: OrderId,
}

/// Request body for `PUT /orders/{order_id}`.
///
/// The `open` field is required but its value does not drive the transition:
/// the endpoint only ever closes, and closed orders never reopen.
#[derive(Debug, Deserialize)]
pub struct CloseOrderRequest {
    pub open: bool,
}

/// Response for a completed delivery.
#[derive(Debug, Serialize)]
pub struct CloseOrderResponse {
    pub status: &'static str,
}

/// Basket status for the caller.
#[derive(Debug, Serialize)]
pub struct BasketStatusResponse {
    pub status: DeliveryStatus,
}

/// Merge an item into the caller's basket, creating it if needed.
///
/// POST /orders/{location_id}
///
/// Re-adding a food already in the basket overwrites its quantity (a
/// "set basket quantity" semantic, not an increment).
///
/// # Errors
///
/// 400 on a non-positive quantity, 401 without a valid bearer token,
/// 500 on unresolvable food/location references.
pub async fn add_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(location_id): Path<LocationId>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<AddItemResponse>)> {
    if req.quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let order_id = OrderRepository::new(state.pool())
        .add_item(
            user.id,
            location_id,
            NewLineItem {
                food_id: req.food_id,
                quantity: req.quantity,
                unit_price: req.price,
            },
        )
        .await?;

    tracing::debug!(user_id = %user.id, order_id = %order_id, food_id = %req.food_id, "basket add");

    Ok((
        StatusCode::CREATED,
        Json(AddItemResponse {
            status: "Created successfully",
            id: order_id,
        }),
    ))
}

/// Mark a delivery complete: the one-way open -> closed transition.
///
/// PUT /orders/{order_id}
///
/// # Errors
///
/// 403 without admin privilege, 404 for an unknown order, 409 if the
/// delivery is already closed.
pub async fn close_order(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
    Json(req): Json<CloseOrderRequest>,
) -> Result<Json<CloseOrderResponse>> {
    // The requested value is recorded for the trace but never honored; the
    // current state alone drives the transition.
    tracing::info!(
        admin_id = %admin.id,
        order_id = %order_id,
        requested_open = req.open,
        "closing delivery"
    );

    OrderRepository::new(state.pool()).close(order_id).await?;

    Ok(Json(CloseOrderResponse {
        status: "Delivered successfully",
    }))
}

/// Report whether the caller's most recent order is open or delivered.
///
/// GET /orders/me
///
/// # Errors
///
/// 404 if the caller has never ordered.
pub async fn basket_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<BasketStatusResponse>> {
    let open = OrderRepository::new(state.pool())
        .latest_open_flag(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;

    Ok(Json(BasketStatusResponse {
        status: DeliveryStatus::from_open(open),
    }))
}

/// List every order with its items.
///
/// GET /orders
///
/// # Errors
///
/// 403 without admin privilege.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}
