//! Member Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::domain::memberships::records::MembershipRecord;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MemberResponse {
    pub uuid: Uuid,

    pub user_uuid: Uuid,

    pub store_uuid: Uuid,

    /// One of owner, admin, manager, staff or viewer
    pub role: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<MembershipRecord> for MemberResponse {
    fn from(membership: MembershipRecord) -> Self {
        MemberResponse {
            uuid: membership.uuid.into(),
            user_uuid: membership.user_uuid.into(),
            store_uuid: membership.store_uuid.into(),
            role: membership.role.to_string(),
            created_at: membership.created_at.to_string(),
            updated_at: membership.updated_at.to_string(),
        }
    }
}
