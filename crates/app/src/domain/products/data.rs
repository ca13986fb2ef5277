//! Products Data

use crate::domain::{products::records::ProductUuid, stores::records::StoreUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,

    /// Unit price in minor units; must be positive.
    pub price: u64,

    /// Opening stock level.
    pub stock: u64,
}

/// Product Update Data; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<u64>,
    pub is_active: Option<bool>,
}

impl ProductUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.sku.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
    }
}

/// Product listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub store: Option<StoreUuid>,
    pub include_inactive: bool,
}
