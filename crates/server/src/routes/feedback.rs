//! Feedback routes.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use mealdrop_core::Email;

use crate::db::catalog::FeedbackRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Feedback;
use crate::state::AppState;

/// Request body for leaving feedback. No authentication needed; anyone can
/// write in with an email address.
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub email: String,
    pub message: Option<String>,
}

/// Record a piece of feedback.
///
/// POST /feedback
///
/// # Errors
///
/// 400 on a malformed email.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>)> {
    let email = Email::parse(&req.email).map_err(|e| AppError::Validation(e.to_string()))?;

    let row = FeedbackRepository::new(state.pool())
        .create(&email, req.message.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// List all feedback, newest first.
///
/// GET /feedback (admin)
///
/// # Errors
///
/// 403 without admin privilege.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Feedback>>> {
    let rows = FeedbackRepository::new(state.pool()).list().await?;
    Ok(Json(rows))
}
