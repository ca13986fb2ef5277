//! Stock Ledger
//!
//! Stock only moves through two atomic statements on the product row:
//! a conditional decrement (`stock >= quantity`) and an unconditional
//! increment. Both run inside the caller's transaction, so an order and the
//! stock it consumes commit or roll back together.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    Add,
    Subtract,
}

/// Requested stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub quantity: u64,
    pub direction: StockDirection,
}

impl StockAdjustment {
    #[must_use]
    pub const fn add(quantity: u64) -> Self {
        Self {
            quantity,
            direction: StockDirection::Add,
        }
    }

    #[must_use]
    pub const fn subtract(quantity: u64) -> Self {
        Self {
            quantity,
            direction: StockDirection::Subtract,
        }
    }
}
