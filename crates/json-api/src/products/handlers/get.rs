//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::domain::products::records::{ProductRecord, ProductUuid};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The store selling the product
    pub store_uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub sku: Option<String>,

    /// The price of the product in cents
    pub price: u64,

    /// Units on hand
    pub stock: u64,

    pub is_active: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            store_uuid: product.store_uuid.into(),
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price,
            stock: product.stock,
            is_active: product.is_active,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductUuid::from_uuid(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
