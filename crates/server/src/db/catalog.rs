//! Catalog repositories: restaurants, foods, locations, feedback.
//!
//! Plain single-row CRUD. Mutations are admin-gated at the route layer.

use sqlx::PgPool;

use mealdrop_core::{Email, FoodId, LocationId, Price, RestaurantId, UserId};

use super::RepositoryError;
use crate::models::{Feedback, Food, Location, Restaurant};

// ============================================================================
// Restaurants
// ============================================================================

/// Fields for updating a restaurant; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct RestaurantUpdate<'a> {
    pub name: Option<&'a str>,
    pub about: Option<&'a str>,
    pub location: Option<&'a str>,
    pub image: Option<&'a str>,
}

/// Repository for restaurant database operations.
pub struct RestaurantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RestaurantRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let rows = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, about, location, image FROM restaurant ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        about: Option<&str>,
        location: Option<&str>,
        image: Option<&str>,
    ) -> Result<Restaurant, RepositoryError> {
        let row = sqlx::query_as::<_, Restaurant>(
            r#"
            INSERT INTO restaurant (name, about, location, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, about, location, image
            "#,
        )
        .bind(name)
        .bind(about)
        .bind(location)
        .bind(image)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Update a restaurant; `None` fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the restaurant doesn't exist.
    pub async fn update(
        &self,
        id: RestaurantId,
        update: &RestaurantUpdate<'_>,
    ) -> Result<Restaurant, RepositoryError> {
        let row = sqlx::query_as::<_, Restaurant>(
            r#"
            UPDATE restaurant
            SET name = COALESCE($2, name),
                about = COALESCE($3, about),
                location = COALESCE($4, location),
                image = COALESCE($5, image)
            WHERE id = $1
            RETURNING id, name, about, location, image
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.about)
        .bind(update.location)
        .bind(update.image)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a restaurant (and its foods, via cascade).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the restaurant doesn't exist.
    pub async fn delete(&self, id: RestaurantId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM restaurant WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Foods
// ============================================================================

/// Fields for updating a food; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct FoodUpdate<'a> {
    pub name: Option<&'a str>,
    pub restaurant_id: Option<RestaurantId>,
    pub price: Option<Price>,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
}

/// Repository for food database operations.
pub struct FoodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FoodRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List foods whose name contains the given term, case-insensitively.
    ///
    /// Plain substring filtering, no ranking.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Food>, RepositoryError> {
        // Escape LIKE metacharacters so they match literally
        let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");

        let rows = sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, restaurant_id, price, description, image
            FROM food
            WHERE name ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(format!("%{escaped}%"))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List every food.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Food>, RepositoryError> {
        let rows = sqlx::query_as::<_, Food>(
            "SELECT id, name, restaurant_id, price, description, image FROM food ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List the foods offered by one restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Food>, RepositoryError> {
        let rows = sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, restaurant_id, price, description, image
            FROM food
            WHERE restaurant_id = $1
            ORDER BY id
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create a food.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, e.g. on an
    /// unknown restaurant reference.
    pub async fn create(
        &self,
        name: &str,
        restaurant_id: RestaurantId,
        price: Price,
        description: Option<&str>,
        image: Option<&str>,
    ) -> Result<Food, RepositoryError> {
        let row = sqlx::query_as::<_, Food>(
            r#"
            INSERT INTO food (name, restaurant_id, price, description, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, restaurant_id, price, description, image
            "#,
        )
        .bind(name)
        .bind(restaurant_id)
        .bind(price)
        .bind(description)
        .bind(image)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Update a food; `None` fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the food doesn't exist.
    pub async fn update(&self, id: FoodId, update: &FoodUpdate<'_>) -> Result<Food, RepositoryError> {
        let row = sqlx::query_as::<_, Food>(
            r#"
            UPDATE food
            SET name = COALESCE($2, name),
                restaurant_id = COALESCE($3, restaurant_id),
                price = COALESCE($4, price),
                description = COALESCE($5, description),
                image = COALESCE($6, image)
            WHERE id = $1
            RETURNING id, name, restaurant_id, price, description, image
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.restaurant_id)
        .bind(update.price)
        .bind(update.description)
        .bind(update.image)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a food.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the food doesn't exist.
    pub async fn delete(&self, id: FoodId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM food WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Locations
// ============================================================================

/// Fields for updating a location; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct LocationUpdate<'a> {
    pub name: Option<&'a str>,
    pub latitude: Option<&'a str>,
    pub longitude: Option<&'a str>,
    pub additional_info: Option<&'a str>,
}

/// Repository for delivery-location database operations.
pub struct LocationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LocationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every location (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Location>, RepositoryError> {
        let rows = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, latitude, longitude, additional_info, user_id
            FROM location ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List the locations a user has saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Location>, RepositoryError> {
        let rows = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, latitude, longitude, additional_info, user_id
            FROM location
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create a location owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        latitude: &str,
        longitude: &str,
        additional_info: Option<&str>,
    ) -> Result<Location, RepositoryError> {
        let row = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO location (name, latitude, longitude, additional_info, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, latitude, longitude, additional_info, user_id
            "#,
        )
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(additional_info)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Update a location owned by a user; `None` fields are left untouched.
    ///
    /// The owner check is part of the WHERE clause, so another user's
    /// location is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the location doesn't exist or
    /// belongs to someone else.
    pub async fn update(
        &self,
        id: LocationId,
        user_id: UserId,
        update: &LocationUpdate<'_>,
    ) -> Result<Location, RepositoryError> {
        let row = sqlx::query_as::<_, Location>(
            r#"
            UPDATE location
            SET name = COALESCE($3, name),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                additional_info = COALESCE($6, additional_info)
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, latitude, longitude, additional_info, user_id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(update.name)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.additional_info)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a location owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the location doesn't exist or
    /// belongs to someone else, and `RepositoryError::Conflict` if an order
    /// still references it.
    pub async fn delete(&self, id: LocationId, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM location WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("location is used by an order".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// Repository for feedback database operations.
pub struct FeedbackRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedbackRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a piece of feedback.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        email: &Email,
        message: Option<&str>,
    ) -> Result<Feedback, RepositoryError> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (email, message)
            VALUES ($1, $2)
            RETURNING id, email, message, created_at
            "#,
        )
        .bind(email)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// List all feedback, newest first (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Feedback>, RepositoryError> {
        let rows = sqlx::query_as::<_, Feedback>(
            "SELECT id, email, message, created_at FROM feedback ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
