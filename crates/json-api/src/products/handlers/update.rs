//! Update Product Handler

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
    access::{Action, Resource},
    domain::products::{data::ProductUpdate, records::ProductUuid},
};

use crate::{
    access::authorize,
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<u64>,
    pub is_active: Option<bool>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            sku: request.sku,
            price: request.price,
            is_active: request.is_active,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not manage this store's products"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
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
        Action::UpdateProduct,
        Resource::Store(existing.store_uuid),
    )
    .await?;

    let product = state
        .app
        .products
        .update_product(uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
