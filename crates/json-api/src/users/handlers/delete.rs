//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::users::records::UserUuid,
};

use crate::{access::authorize, extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// Soft-deletes the account; its tokens stop authenticating immediately.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "User deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let user = UserUuid::from_uuid(user.into_inner());

    authorize(state, actor, Action::ManageUsers, Resource::Platform).await?;

    state
        .app
        .users
        .delete_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
