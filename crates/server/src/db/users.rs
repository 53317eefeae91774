//! User repository for database operations.
//!
//! Queries are bound at runtime (no compile-time database required); row
//! shapes map onto domain types via `FromRow`.

use sqlx::PgPool;

use mealdrop_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Columns selected whenever a full [`User`] is returned.
const USER_COLUMNS: &str =
    r#"id, email, name, phone_number, image, admin, created_at, updated_at"#;

/// A new account, ready for insertion (password already hashed).
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a Email,
    pub name: &'a str,
    pub phone_number: &'a str,
    pub image: Option<&'a str>,
    pub admin: bool,
}

/// Profile fields a user may change; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate<'a> {
    pub email: Option<&'a Email>,
    pub name: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub image: Option<&'a str>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no account uses this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_hash_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(&format!(
            r#"SELECT {USER_COLUMNS}, password_hash FROM "user" WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (r.user, r.password_hash)))
    }

    /// Get a user's password hash by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_hash_by_id(&self, id: UserId) -> Result<String, RepositoryError> {
        sqlx::query_scalar::<_, String>(r#"SELECT password_hash FROM "user" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or phone number is
    /// already registered. Returns `RepositoryError::Database` otherwise.
    pub async fn create(
        &self,
        new_user: &NewUser<'_>,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO "user" (email, name, phone_number, password_hash, image, admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.email)
        .bind(new_user.name)
        .bind(new_user.phone_number)
        .bind(password_hash)
        .bind(new_user.image)
        .bind(new_user.admin)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "email or phone number already registered".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Update a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` on a unique violation.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate<'_>,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE "user"
            SET email = COALESCE($2, email),
                name = COALESCE($3, name),
                phone_number = COALESCE($4, phone_number),
                image = COALESCE($5, image),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.email)
        .bind(update.name)
        .bind(update.phone_number)
        .bind(update.image)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "email or phone number already registered".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        user.ok_or(RepositoryError::NotFound)
    }

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query(r#"UPDATE "user" SET password_hash = $2, updated_at = now() WHERE id = $1"#)
                .bind(id)
                .bind(password_hash)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Row shape for queries that also need the credential.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}
