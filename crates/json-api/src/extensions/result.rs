//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{error, warn};

/// Map any error to an HTTP error, logging the cause.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    fn or_400(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            warn!("{context}: {error}");

            StatusError::bad_request().brief(format!("{context}: {error}"))
        })
    }
}
