//! Order Data

use crate::domain::{
    orders::{records::OrderUuid, status::OrderStatus},
    products::records::ProductUuid,
    stores::records::StoreUuid,
    users::records::UserUuid,
};

/// Contact details captured with the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Structured shipping address; every field is required and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Name of the first blank field, if any.
    #[must_use]
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .find_map(|(name, value)| value.trim().is_empty().then_some(name))
    }
}

/// Requested order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u32,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub store: StoreUuid,

    /// Authenticated user placing the order, when known.
    pub placed_by: Option<UserUuid>,

    pub customer: CustomerDetails,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// Status, payment and notes change for an existing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
    pub is_paid: Option<bool>,
}

impl OrderStatusUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none() && self.is_paid.is_none()
    }
}

/// Order listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub placed_by: Option<UserUuid>,
    pub store: Option<StoreUuid>,
    pub status: Option<OrderStatus>,
}
