//! Get User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::users::records::UserUuid,
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Get User Handler
///
/// Global admins only; callers read their own account through `/users/me`.
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    authorize(state, actor, Action::ManageUsers, Resource::Platform).await?;

    let user = state
        .app
        .users
        .get_user(UserUuid::from_uuid(user.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
