//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::products::records::ProductUuid,
};

use crate::{access::authorize, extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not manage this store's products"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let uuid = ProductUuid::from_uuid(product.into_inner());

    let existing = state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(into_status_error)?;

    authorize(
        state,
        actor,
        Action::DeleteProduct,
        Resource::Store(existing.store_uuid),
    )
    .await?;

    state
        .app
        .products
        .delete_product(uuid)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
