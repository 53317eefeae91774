//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mealdrop_core::{Email, UserId};

/// A Mealdrop account (domain type).
///
/// The password hash deliberately lives outside this type so it can never be
/// serialized to a client; repositories return it separately where needed.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Phone number (unique).
    pub phone_number: String,
    /// Optional profile image URL.
    pub image: Option<String>,
    /// Administrative privilege flag.
    pub admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
