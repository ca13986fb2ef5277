//! User Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::domain::users::records::UserRecord;

pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod me;
pub(crate) mod update;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    pub email: String,

    pub full_name: String,

    /// One of admin, owner, seller or customer
    pub role: String,

    /// Inactive users cannot authenticate
    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            full_name: user.full_name,
            role: user.role.to_string(),
            is_active: user.is_active,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}
