//! Profile and password routes for the authenticated account.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use mealdrop_core::Email;

use crate::db::users::{ProfileUpdate, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Request body for `PUT /me`; omitted fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
}

/// Request body for the password routes.
#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

/// Plain status envelope.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Get the caller's profile.
///
/// GET /me
///
/// # Errors
///
/// 401 without a valid bearer token.
#[allow(clippy::unused_async)]
pub async fn me(RequireUser(user): RequireUser) -> Json<User> {
    Json(user)
}

/// Update the caller's profile.
///
/// PUT /me
///
/// # Errors
///
/// 400 on a malformed email, 409 if the new email or phone number is taken.
pub async fn update_me(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    let email = req
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = UserRepository::new(state.pool())
        .update_profile(
            user.id,
            &ProfileUpdate {
                email: email.as_ref(),
                name: req.name.as_deref(),
                phone_number: req.phone_number.as_deref(),
                image: req.image.as_deref(),
            },
        )
        .await?;

    Ok(Json(updated))
}

/// Verify the caller's current password without changing anything.
///
/// POST /me/password
///
/// # Errors
///
/// 401 if the password is wrong.
pub async fn verify_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<PasswordRequest>,
) -> Result<Json<StatusResponse>> {
    AuthService::new(state.pool(), state.tokens())
        .verify_current_password(user.id, &req.password)
        .await?;

    Ok(Json(StatusResponse {
        status: "Correct password!",
    }))
}

/// Set a new password for the caller.
///
/// PUT /me/password
///
/// # Errors
///
/// 400 if the new password is too weak.
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<PasswordRequest>,
) -> Result<Json<StatusResponse>> {
    AuthService::new(state.pool(), state.tokens())
        .change_password(user.id, &req.password)
        .await?;

    tracing::info!(user_id = %user.id, "password changed");

    Ok(Json(StatusResponse {
        status: "password changed",
    }))
}
