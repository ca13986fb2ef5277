//! User Data

use crate::{access::Role, domain::users::records::UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Partial user update. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}
