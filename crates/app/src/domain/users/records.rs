//! User Records

use jiff::Timestamp;

use crate::{access::Role, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub full_name: String,

    /// Platform-wide role.
    pub role: Role,

    /// Inactive users cannot authenticate.
    pub is_active: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
