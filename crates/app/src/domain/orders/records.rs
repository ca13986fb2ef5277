//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        orders::{
            data::{CustomerDetails, ShippingAddress},
            status::OrderStatus,
        },
        products::records::ProductUuid,
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub store_uuid: StoreUuid,
    pub placed_by: Option<UserUuid>,
    pub customer: CustomerDetails,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_cost: u64,
    pub total: u64,
    pub status: OrderStatus,
    pub is_paid: bool,

    /// First time the order was marked paid; never overwritten.
    pub paid_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub items: Vec<OrderItemRecord>,
}

/// Order Item Record; immutable once written.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// Product price at the time the order was placed.
    pub unit_price: u64,

    pub subtotal: u64,
    pub created_at: Timestamp,
}
