//! Store Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, get::StoreResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoresResponse {
    /// The list of stores
    pub stores: Vec<StoreResponse>,
}

/// Store Index Handler
///
/// Global admins see every store; everyone else sees the stores they belong to.
#[endpoint(
    tags("stores"),
    summary = "List Stores",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<StoresResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = state.pagination.page(skip.into_inner(), limit.into_inner())?;

    let member = (!actor.is_admin()).then_some(actor.user);

    let stores = state
        .app
        .stores
        .list_stores(member, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(StoresResponse {
        stores: stores.into_iter().map(Into::into).collect(),
    }))
}
