//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::TokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid access token")]
    InvalidToken,

    #[error("access token has expired")]
    ExpiredToken,

    /// The subject is missing, inactive or soft-deleted.
    #[error("unknown or inactive user")]
    UnknownUser,

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => Self::ExpiredToken,
            TokenError::Invalid => Self::InvalidToken,
            TokenError::Encoding(_) | TokenError::OutOfRange(_) => Self::Token(error),
        }
    }
}
