//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::{
        products::{data::NewProduct, records::ProductUuid},
        stores::records::StoreUuid,
    },
};

use crate::{
    access::authorize,
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub store_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,

    /// Unit price in cents
    pub price: u64,

    /// Opening stock
    #[serde(default)]
    pub stock: u64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            store_uuid: request.store_uuid.into(),
            name: request.name,
            description: request.description,
            sku: request.sku,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not manage this store's products"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let product: NewProduct = json.into_inner().into();

    authorize(
        state,
        actor,
        Action::CreateProduct,
        Resource::Store(product.store_uuid),
    )
    .await?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
