//! Access token signing and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// HMAC key used to sign access tokens.
#[derive(Clone)]
pub struct JwtSecret(String);

impl JwtSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(**redacted**)")
    }
}

impl Drop for JwtSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User uuid.
    pub sub: Uuid,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiry, unix seconds.
    pub exp: i64,
}

impl AccessClaims {
    #[must_use]
    pub fn new(user: Uuid, issued_at: Timestamp, ttl: SignedDuration) -> Self {
        let iat = issued_at.as_second();

        Self {
            sub: user,
            iat,
            exp: iat.saturating_add(ttl.as_secs()),
        }
    }

    /// Expiry as a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::OutOfRange`] if `exp` is not a representable instant.
    pub fn expires_at(&self) -> Result<Timestamp, TokenError> {
        Timestamp::from_second(self.exp).map_err(TokenError::OutOfRange)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed or its signature does not match")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token could not be signed")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    #[error("token expiry is out of range")]
    OutOfRange(#[source] jiff::Error),
}

/// Sign `claims` with HS256.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if signing fails.
pub fn encode_access_token(secret: &JwtSecret, claims: &AccessClaims) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Verify signature and expiry, returning the claims.
///
/// # Errors
///
/// Returns [`TokenError::Expired`] for expired tokens and [`TokenError::Invalid`]
/// for anything else that fails verification.
pub fn decode_access_token(secret: &JwtSecret, token: &str) -> Result<AccessClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<AccessClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|error| match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}
