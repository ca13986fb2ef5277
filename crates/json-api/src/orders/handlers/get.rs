//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::orders::records::{OrderRecord, OrderUuid},
};

use crate::{
    access::authorize,
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Resource describing an order for access checks.
pub(crate) fn order_resource(order: &OrderRecord) -> Resource {
    Resource::Order {
        store: order.store_uuid,
        placed_by: order.placed_by,
    }
}

/// Get Order Handler
///
/// Returns an order with its items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .get_order(OrderUuid::from_uuid(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    authorize(state, actor, Action::ReadOrder, order_resource(&order)).await?;

    Ok(Json(order.into()))
}
