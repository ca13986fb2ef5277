//! Membership Records

use jiff::Timestamp;

use crate::{
    access::StoreRole,
    domain::{stores::records::StoreUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Membership UUID
pub type MembershipUuid = TypedUuid<MembershipRecord>;

/// Membership Record
///
/// Links a user to a store with a store-scoped role. Only rows that are
/// active and not soft-deleted grant access.
#[derive(Debug, Clone)]
pub struct MembershipRecord {
    pub uuid: MembershipUuid,
    pub user_uuid: UserUuid,
    pub store_uuid: StoreUuid,
    pub role: StoreRole,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
