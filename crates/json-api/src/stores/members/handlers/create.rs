//! Add Member Handler

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
    domain::{
        memberships::{data::NewMembership, records::MembershipUuid},
        stores::records::StoreUuid,
    },
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    stores::members::{MemberResponse, errors::into_status_error},
};

/// Add Member Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddMemberRequest {
    pub user_uuid: Uuid,

    /// One of owner, admin, manager, staff or viewer
    pub role: String,
}

/// Add Member Handler
#[endpoint(
    tags("stores"),
    summary = "Add Store Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Member added"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not add members"),
        (status_code = StatusCode::CONFLICT, description = "User is already a member"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    json: JsonBody<AddMemberRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());
    let request = json.into_inner();
    let role: StoreRole = request.role.parse().or_400("invalid store role")?;

    authorize(state, actor, Action::AddMember, Resource::Store(store)).await?;

    let membership = state
        .app
        .memberships
        .add_member(
            store,
            NewMembership {
                uuid: MembershipUuid::new(),
                user: request.user_uuid.into(),
                role,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(membership.into()))
}
