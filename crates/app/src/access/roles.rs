//! Platform and store roles.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("unknown role: {0}")]
    Unknown(String),

    #[error("unknown legacy role code: {0}")]
    UnknownLegacyCode(i16),
}

/// Global role carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
    Seller,
    Customer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Seller => "seller",
            Self::Customer => "customer",
        }
    }

    /// Convert the integer codes used by older user records.
    ///
    /// `1` admin, `2` owner (entrepreneur), `3` customer, `4` seller.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::UnknownLegacyCode`] for any other value.
    pub fn try_from_legacy_code(code: i16) -> Result<Self, RoleError> {
        match code {
            1 => Ok(Self::Admin),
            2 => Ok(Self::Owner),
            3 => Ok(Self::Customer),
            4 => Ok(Self::Seller),
            other => Err(RoleError::UnknownLegacyCode(other)),
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            "seller" => Ok(Self::Seller),
            "customer" => Ok(Self::Customer),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Role of a user within a single store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    Owner,
    Admin,
    Manager,
    Staff,
    Viewer,
}

impl StoreRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
            Self::Viewer => "viewer",
        }
    }
}

impl Display for StoreRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreRole {
    type Err = RoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            "viewer" => Ok(Self::Viewer),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}
