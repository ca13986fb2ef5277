//! Membership Errors

use salvo::http::StatusError;
use tracing::error;

use hilo_app::domain::memberships::MembershipsServiceError;

pub(crate) fn into_status_error(error: MembershipsServiceError) -> StatusError {
    match error {
        MembershipsServiceError::AlreadyExists => {
            StatusError::conflict().brief("User is already a member of this store")
        }
        MembershipsServiceError::NotFound => {
            StatusError::not_found().brief("Store or membership not found")
        }
        MembershipsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown user")
        }
        MembershipsServiceError::MissingRequiredData | MembershipsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid membership payload")
        }
        MembershipsServiceError::Sql(source) => {
            error!("membership storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
