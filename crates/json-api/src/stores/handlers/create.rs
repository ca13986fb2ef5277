//! Create Store Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use hilo_app::{
    access::{Action, Resource},
    domain::stores::{data::NewStore, records::StoreUuid},
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    stores::{errors::into_status_error, get::StoreResponse},
};

/// Create Store Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateStoreRequest {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
}

impl From<CreateStoreRequest> for NewStore {
    fn from(request: CreateStoreRequest) -> Self {
        NewStore {
            uuid: StoreUuid::new(),
            name: request.name,
            description: request.description,
            address: request.address,
            phone: request.phone,
            email: request.email,
        }
    }
}

/// Create Store Handler
///
/// The caller becomes the store's owner.
#[endpoint(
    tags("stores"),
    summary = "Create Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Store created"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not create stores"),
        (status_code = StatusCode::CONFLICT, description = "Store already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateStoreRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    authorize(state, actor, Action::CreateStore, Resource::Platform).await?;

    let store = state
        .app
        .stores
        .create_store(actor.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/stores/{}", store.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(store.into()))
}
