//! User Errors

use salvo::http::StatusError;
use tracing::error;

use hilo_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::EmptyUpdate => {
            StatusError::bad_request().brief("Update contains no fields")
        }
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
