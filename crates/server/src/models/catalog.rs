//! Catalog domain types: restaurants, foods, delivery locations, feedback.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mealdrop_core::{Email, FeedbackId, FoodId, LocationId, Price, RestaurantId, UserId};

/// A restaurant in the catalog.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub about: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

/// A food item offered by a restaurant.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    pub restaurant_id: RestaurantId,
    pub price: Price,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// A delivery location, optionally owned by a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub additional_info: Option<String>,
    pub user_id: Option<UserId>,
}

/// A piece of customer feedback.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: FeedbackId,
    pub email: Email,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
