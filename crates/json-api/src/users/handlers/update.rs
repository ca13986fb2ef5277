//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource, Role},
    domain::users::{data::UserUpdate, records::UserUuid},
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Update User Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,

    /// One of admin, owner, seller or customer
    pub role: Option<String>,

    /// Deactivated users can no longer authenticate
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    fn into_update(self) -> Result<UserUpdate, StatusError> {
        let role = self
            .role
            .map(|role| role.parse::<Role>())
            .transpose()
            .or_400("invalid role")?;

        Ok(UserUpdate {
            email: self.email,
            full_name: self.full_name,
            role,
            is_active: self.is_active,
        })
    }
}

/// Update User Handler
///
/// Global admins only.
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Email is already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let user = UserUuid::from_uuid(user.into_inner());
    let update = json.into_inner().into_update()?;

    if update.is_empty() {
        return Err(StatusError::bad_request().brief("Update contains no fields"));
    }

    authorize(state, actor, Action::ManageUsers, Resource::Platform).await?;

    let user = state
        .app
        .users
        .update_user(user, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
