//! Order Status
//!
//! ```text
//! pending ──► processing ──► shipped ──► delivered ──► refunded
//!    │             │
//!    └──► cancelled ◄┘
//! ```
//!
//! `cancelled` and `refunded` are terminal.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot change order status from {from} to {to}")]
pub struct IllegalTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Statuses reachable in one step.
    #[must_use]
    pub const fn next_statuses(self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered => &[Self::Refunded],
            Self::Cancelled | Self::Refunded => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }

    /// Validate a move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] naming both statuses when `next` is not
    /// reachable from `self`.
    pub fn transition(self, next: OrderStatus) -> Result<OrderStatus, IllegalTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(IllegalTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            _ => Err(UnknownOrderStatus(value.to_string())),
        }
    }
}
