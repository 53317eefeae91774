//! Bearer-token signing and verification.
//!
//! Tokens are HS256 JWTs carrying the account id. The signing secret is
//! process-wide, injected at construction, and never mutated afterwards.
//! Verification checks both the signature and the `exp` claim, so a leaked
//! token stops working once its lifetime runs out.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use mealdrop_core::UserId;

use super::AuthError;

/// Claims embedded in a bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account id.
    sub: i32,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Signs and verifies bearer tokens against the process-wide secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer from the configured secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl,
        }
    }

    /// Issue a signed token for an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn sign(&self, user_id: UserId) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_i32(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenSigning)
    }

    /// Verify a token's signature and expiry and extract the account id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for any malformed, tampered, or
    /// expired token. A client-caused bad token is never a server fault.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(UserId::new(data.claims.sub))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signer(ttl_seconds: i64) -> TokenSigner {
        let secret = SecretString::from("kX9#mP2$vL5@qR8&wT1*zN4^bF7!jH0c");
        TokenSigner::new(&secret, Duration::seconds(ttl_seconds))
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let signer = signer(3600);
        let token = signer.sign(UserId::new(42)).unwrap();
        assert_eq!(signer.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn test_verify_garbage() {
        let signer = signer(3600);
        assert!(matches!(
            signer.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_tampered() {
        let signer = signer(3600);
        let mut token = signer.sign(UserId::new(1)).unwrap();
        // Flip a character in the signature segment
        let flipped = if token.ends_with('a') { 'b' } else { 'a' };
        token.pop();
        token.push(flipped);
        assert!(matches!(
            signer.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = signer(3600).sign(UserId::new(1)).unwrap();
        let other = TokenSigner::new(
            &SecretString::from("dQ3%yU6(eW9)rI2-oP5_aS8+fG1=hJ4k"),
            Duration::seconds(3600),
        );
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_expired() {
        // Issued already past its expiry, beyond the default leeway
        let signer = signer(-3600);
        let token = signer.sign(UserId::new(1)).unwrap();
        assert!(matches!(
            signer.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
