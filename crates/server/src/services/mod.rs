//! Business logic services for the Mealdrop API.
//!
//! # Services
//!
//! - `auth` - Account registration, login, password changes, and the
//!   bearer-token signer every protected request is resolved against

pub mod auth;

pub use auth::{AuthError, AuthService, TokenSigner};
