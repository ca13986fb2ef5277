//! Store Data

use serde::{Deserialize, Serialize};

use crate::domain::stores::records::StoreUuid;

/// New Store Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Partial store update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Editable store column, used to gate partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreField {
    Name,
    Description,
    Address,
    Phone,
    Email,
    IsActive,
}

impl StoreUpdate {
    /// Fields this update touches.
    #[must_use]
    pub fn fields(&self) -> Vec<StoreField> {
        [
            (self.name.is_some(), StoreField::Name),
            (self.description.is_some(), StoreField::Description),
            (self.address.is_some(), StoreField::Address),
            (self.phone.is_some(), StoreField::Phone),
            (self.email.is_some(), StoreField::Email),
            (self.is_active.is_some(), StoreField::IsActive),
        ]
        .into_iter()
        .filter_map(|(present, field)| present.then_some(field))
        .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}
