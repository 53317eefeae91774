//! Authentication middleware and extractors.
//!
//! [`RequireUser`] is the principal resolver: it turns the request's bearer
//! credential into a full account record or rejects the request. Every
//! failure mode (missing token, invalid or expired token, unknown account)
//! maps to 401; only a store fault is a 500. [`RequireAdmin`] layers the role
//! gate on top: same resolution, then a privilege check that fails with 403.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::AuthError;
use crate::state::AppState;

/// Extractor that requires an authenticated principal.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_principal(parts, state).await?;
        Ok(Self(user))
    }
}

/// Extractor that requires an authenticated principal with the admin flag.
///
/// Runs the same resolution as [`RequireUser`], then asserts the privilege;
/// a valid non-admin credential is Forbidden, not Unauthorized.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_principal(parts, state).await?;

        if !user.admin {
            return Err(AppError::Forbidden(
                "administrator privilege required".to_string(),
            ));
        }

        Ok(Self(user))
    }
}

/// Resolve the request's bearer credential into an account.
async fn resolve_principal(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;

    let user_id = state.tokens().verify(token)?;

    // The account may have disappeared since the token was issued; that is
    // still a credential problem, not a server fault.
    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await? // store failure propagates as an internal fault
        .ok_or(AuthError::UnknownAccount)?;

    Ok(user)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);
    }
}
