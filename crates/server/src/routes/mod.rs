//! HTTP route handlers for the Mealdrop API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Accounts
//! POST /signup                 - Register, returns a bearer token
//! POST /login                  - Login, returns a bearer token
//! GET  /me                     - Own profile (auth)
//! PUT  /me                     - Update own profile (auth)
//! POST /me/password            - Verify current password (auth)
//! PUT  /me/password            - Change password (auth)
//!
//! # Orders
//! GET  /orders                 - All orders with items (admin)
//! GET  /orders/me              - Basket status for the caller (auth)
//! POST /orders/{location_id}   - Add an item to the caller's basket (auth)
//! PUT  /orders/{order_id}      - Mark a delivery complete (admin)
//!
//! # Catalog
//! GET  /restaurants            - List restaurants
//! POST /restaurants            - Create restaurant (admin)
//! PUT  /restaurants/{id}       - Update restaurant (admin)
//! DELETE /restaurants/{id}     - Delete restaurant (admin)
//! GET  /restaurants/{id}/foods - Foods offered by a restaurant
//! GET  /foods                  - List foods
//! GET  /foods/search/{term}    - Foods whose name contains the term
//! POST /foods                  - Create food (admin)
//! PUT  /foods/{id}             - Update food (admin)
//! DELETE /foods/{id}           - Delete food (admin)
//!
//! # Locations & feedback
//! GET  /locations              - All delivery locations (admin)
//! POST /locations              - Save a delivery location (auth)
//! GET  /locations/mine         - Caller's saved locations (auth)
//! PUT  /locations/mine/{id}    - Update an own location (auth)
//! DELETE /locations/mine/{id}  - Delete an own location (auth)
//! POST /feedback               - Leave feedback
//! GET  /feedback               - List feedback (admin)
//! ```

pub mod account;
pub mod auth;
pub mod feedback;
pub mod foods;
pub mod locations;
pub mod orders;
pub mod restaurants;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/me", get(account::me).put(account::update_me))
        .route(
            "/me/password",
            post(account::verify_password).put(account::change_password),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list_all))
        .route("/orders/me", get(orders::basket_status))
        .route(
            "/orders/{id}",
            post(orders::add_item).put(orders::close_order),
        )
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants",
            get(restaurants::list).post(restaurants::create),
        )
        .route(
            "/restaurants/{id}",
            put(restaurants::update).delete(restaurants::delete),
        )
        .route("/restaurants/{id}/foods", get(foods::list_by_restaurant))
        .route("/foods", get(foods::list).post(foods::create))
        .route("/foods/search/{term}", get(foods::search))
        .route("/foods/{id}", put(foods::update).delete(foods::delete))
        .route(
            "/locations",
            get(locations::list_all).post(locations::create),
        )
        .route("/locations/mine", get(locations::list_mine))
        .route(
            "/locations/mine/{id}",
            put(locations::update_mine).delete(locations::delete_mine),
        )
        .route("/feedback", post(feedback::create).get(feedback::list))
}

/// Assemble all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(account_routes())
        .merge(order_routes())
        .merge(catalog_routes())
}
