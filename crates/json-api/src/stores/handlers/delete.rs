//! Delete Store Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::stores::records::StoreUuid,
};

use crate::{access::authorize, extensions::*, state::State, stores::errors::into_status_error};

/// Delete Store Handler
#[endpoint(
    tags("stores"),
    summary = "Delete Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Store deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the owner may delete a store"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());

    authorize(state, actor, Action::DeleteStore, Resource::Store(store)).await?;

    state
        .app
        .stores
        .delete_store(store)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
