//! Signup and login routes.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::{AuthService, auth::Signup};
use crate::state::AppState;

/// Request body for `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub phone_number: String,
    pub password: String,
    pub image: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub status: &'static str,
    pub token: String,
}

/// Register a new account.
///
/// POST /signup
///
/// # Errors
///
/// 400 on invalid email or weak password, 409 if the email or phone number
/// is already registered.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let (user, token) = auth
        .signup(&Signup {
            email: &req.email,
            name: &req.name,
            phone_number: &req.phone_number,
            password: &req.password,
            image: req.image.as_deref(),
            admin: req.admin,
        })
        .await?;

    tracing::info!(user_id = %user.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            status: "Signup success!",
            token,
        }),
    ))
}

/// Login with email and password.
///
/// POST /login
///
/// # Errors
///
/// 401 on an incorrect email/password combination.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let (user, token) = auth.login(&req.email, &req.password).await?;

    tracing::debug!(user_id = %user.id, "login");

    Ok(Json(TokenResponse {
        status: "Login success!",
        token,
    }))
}
