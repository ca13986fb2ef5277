//! Access service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessServiceError {
    #[error("forbidden")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccessServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
