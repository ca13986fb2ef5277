//! Get Store Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::stores::records::{StoreRecord, StoreUuid},
};

use crate::{access::authorize, extensions::*, state::State, stores::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    /// The unique identifier of the store
    pub uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub address: String,

    pub phone: String,

    pub email: Option<String>,

    /// Inactive stores stay visible to their members
    pub is_active: bool,

    /// The date and time the store was created
    pub created_at: String,

    /// The date and time the store was last updated
    pub updated_at: String,
}

impl From<StoreRecord> for StoreResponse {
    fn from(store: StoreRecord) -> Self {
        StoreResponse {
            uuid: store.uuid.into(),
            name: store.name,
            description: store.description,
            address: store.address,
            phone: store.phone,
            email: store.email,
            is_active: store.is_active,
            created_at: store.created_at.to_string(),
            updated_at: store.updated_at.to_string(),
        }
    }
}

/// Get Store Handler
///
/// Returns a store the caller belongs to.
#[endpoint(
    tags("stores"),
    summary = "Get Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this store"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());

    authorize(state, actor, Action::ReadStore, Resource::Store(store)).await?;

    let store = state
        .app
        .stores
        .get_store(store)
        .await
        .map_err(into_status_error)?;

    Ok(Json(store.into()))
}
