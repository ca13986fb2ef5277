//! Store Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
