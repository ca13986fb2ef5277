//! Update Order Status Handler

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
    access::Action,
    domain::orders::{data::OrderStatusUpdate, records::OrderUuid, status::OrderStatus},
};

use crate::{
    access::authorize,
    extensions::*,
    observability::record_order_cancelled,
    orders::{OrderResponse, errors::into_status_error, get::order_resource},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Next status; must be reachable from the current one
    pub status: Option<String>,

    pub notes: Option<String>,

    pub is_paid: Option<bool>,
}

impl UpdateOrderStatusRequest {
    fn into_update(self) -> Result<OrderStatusUpdate, StatusError> {
        let status = self
            .status
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .or_400("invalid order status")?;

        Ok(OrderStatusUpdate {
            status,
            notes: self.notes,
            is_paid: self.is_paid,
        })
    }
}

/// Update Order Status Handler
///
/// Cancelling a pending or processing order puts its stock back.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Illegal status transition"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let uuid = OrderUuid::from_uuid(order.into_inner());
    let update = json.into_inner().into_update()?;

    let existing = state
        .app
        .orders
        .get_order(uuid)
        .await
        .map_err(into_status_error)?;

    authorize(state, actor, Action::UpdateOrder, order_resource(&existing)).await?;

    let order = state
        .app
        .orders
        .update_order_status(uuid, update)
        .await
        .map_err(into_status_error)?;

    if order.status == OrderStatus::Cancelled && existing.status != OrderStatus::Cancelled {
        record_order_cancelled();
    }

    Ok(Json(order.into()))
}
