//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::domain::orders::{
    data::{CustomerDetails, ShippingAddress},
    records::{OrderItemRecord, OrderRecord},
};

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

/// Customer contact details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerDetails> for CustomerPayload {
    fn from(customer: CustomerDetails) -> Self {
        CustomerPayload {
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        }
    }
}

/// Shipping address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressPayload {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddress> for AddressPayload {
    fn from(address: ShippingAddress) -> Self {
        AddressPayload {
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

impl From<AddressPayload> for ShippingAddress {
    fn from(address: AddressPayload) -> Self {
        ShippingAddress {
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Price per unit in cents, captured when the order was placed
    pub unit_price: u64,

    pub subtotal: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Human readable number, `ORD-YYYYMMDD-NNNNN`
    pub order_number: String,

    pub store_uuid: Uuid,

    pub placed_by: Option<Uuid>,

    pub customer: CustomerPayload,

    pub shipping_address: AddressPayload,

    pub notes: Option<String>,

    /// Amounts in cents
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_cost: u64,
    pub total: u64,

    pub status: String,

    pub is_paid: bool,

    pub paid_at: Option<String>,

    pub created_at: String,

    pub updated_at: String,

    pub items: Vec<OrderItemResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            store_uuid: order.store_uuid.into(),
            placed_by: order.placed_by.map(Into::into),
            customer: order.customer.into(),
            shipping_address: order.shipping_address.into(),
            notes: order.notes,
            subtotal: order.subtotal,
            tax: order.tax,
            shipping_cost: order.shipping_cost,
            total: order.total,
            status: order.status.to_string(),
            is_paid: order.is_paid,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}
