//! Membership Data

use crate::{
    access::StoreRole,
    domain::{memberships::records::MembershipUuid, users::records::UserUuid},
};

/// New Membership Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewMembership {
    pub uuid: MembershipUuid,
    pub user: UserUuid,
    pub role: StoreRole,
}
