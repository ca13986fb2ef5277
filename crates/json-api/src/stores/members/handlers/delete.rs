//! Remove Member Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::{stores::records::StoreUuid, users::records::UserUuid},
};

use crate::{
    access::authorize, extensions::*, state::State, stores::members::errors::into_status_error,
};

/// Remove Member Handler
///
/// Owners may remove anyone; members may always remove themselves.
#[endpoint(
    tags("stores"),
    summary = "Remove Store Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Member removed"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not remove this member"),
        (status_code = StatusCode::NOT_FOUND, description = "Membership not found"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());
    let user = UserUuid::from_uuid(user.into_inner());

    authorize(
        state,
        actor,
        Action::RemoveMember { member: user },
        Resource::Store(store),
    )
    .await?;

    state
        .app
        .memberships
        .remove_member(store, user)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
