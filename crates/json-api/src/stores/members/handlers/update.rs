//! Change Member Role Handler

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
    access::{Action, Resource, StoreRole},
    domain::{stores::records::StoreUuid, users::records::UserUuid},
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    stores::members::{MemberResponse, errors::into_status_error},
};

/// Change Member Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangeRoleRequest {
    pub role: String,
}

/// Change Member Role Handler
#[endpoint(
    tags("stores"),
    summary = "Change Store Member Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Role changed"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the owner may change roles"),
        (status_code = StatusCode::NOT_FOUND, description = "Membership not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    user: PathParam<Uuid>,
    json: JsonBody<ChangeRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<MemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());
    let user = UserUuid::from_uuid(user.into_inner());
    let role: StoreRole = json.into_inner().role.parse().or_400("invalid store role")?;

    authorize(state, actor, Action::ChangeMemberRole, Resource::Store(store)).await?;

    let membership = state
        .app
        .memberships
        .change_role(store, user, role)
        .await
        .map_err(into_status_error)?;

    Ok(Json(membership.into()))
}
