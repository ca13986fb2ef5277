//! Stock Adjustment Handler

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
    domain::products::{
        records::ProductUuid,
        stock::{StockAdjustment, StockDirection},
    },
};

use crate::{
    access::authorize,
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Stock Adjustment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockAdjustmentRequest {
    /// Units to move, greater than zero
    pub quantity: u64,

    /// Either "add" or "subtract"
    pub direction: String,
}

fn parse_direction(direction: &str) -> Result<StockDirection, StatusError> {
    match direction {
        "add" => Ok(StockDirection::Add),
        "subtract" => Ok(StockDirection::Subtract),
        _ => Err(StatusError::bad_request().brief("direction must be \"add\" or \"subtract\"")),
    }
}

/// Stock Adjustment Handler
///
/// Stock never drops below zero; a subtraction larger than the stock on
/// hand is rejected.
#[endpoint(
    tags("products"),
    summary = "Adjust Product Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not adjust stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Insufficient stock or invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<StockAdjustmentRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let uuid = ProductUuid::from_uuid(product.into_inner());
    let request = json.into_inner();

    let adjustment = StockAdjustment {
        quantity: request.quantity,
        direction: parse_direction(&request.direction)?,
    };

    let existing = state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(into_status_error)?;

    authorize(
        state,
        actor,
        Action::AdjustStock,
        Resource::Store(existing.store_uuid),
    )
    .await?;

    let product = state
        .app
        .products
        .adjust_stock(uuid, adjustment)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
