//! Database operations for the Mealdrop `PostgreSQL` store.
//!
//! # Tables
//!
//! - `user` - Accounts and their credentials
//! - `restaurant`, `food` - Catalog data
//! - `location` - Delivery locations
//! - `order`, `order_item` - Baskets and delivery history
//! - `feedback` - Customer feedback
//!
//! A partial unique index on `order (user_id) WHERE open` enforces the
//! one-open-basket-per-user invariant at the store level; see
//! [`orders::OrderRepository::add_item`] for the upsert that relies on it.
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run on startup via
//! `sqlx::migrate!`.

pub mod catalog;
pub mod orders;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, already-closed delivery).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
