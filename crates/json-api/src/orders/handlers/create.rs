//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::{
        orders::{
            data::{CustomerDetails, NewOrder, NewOrderItem},
            records::OrderUuid,
        },
        users::records::UserUuid,
    },
};

use crate::{
    access::authorize,
    extensions::*,
    observability::record_order_created,
    orders::{AddressPayload, OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub store_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: AddressPayload,
    pub notes: Option<String>,
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    fn into_new_order(self, placed_by: Option<UserUuid>) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            store: self.store_id.into(),
            placed_by,
            customer: CustomerDetails {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
            },
            shipping_address: self.shipping_address.into(),
            notes: self.notes,
            items: self
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product_id.into(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Create Order Handler
///
/// Prices the order from current product prices and reserves its stock.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order or insufficient stock"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::NOT_FOUND, description = "Store or product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let order = json.into_inner().into_new_order(Some(actor.user));

    authorize(state, actor, Action::CreateOrder, Resource::Store(order.store)).await?;

    let order = state
        .app
        .orders
        .create_order(order)
        .await
        .map_err(into_status_error)?;

    info!(
        order = %order.uuid,
        order_number = %order.order_number,
        total = order.total,
        "order placed"
    );
    record_order_created();

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
