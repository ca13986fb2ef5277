//! Order Totals
//!
//! All amounts are whole minor units. Tax is the only fractional step and is
//! rounded half away from zero.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::config::OrderSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    #[error("order amount exceeds the supported range")]
    Overflow,
}

/// Derived order amounts; `total = subtotal + tax + shipping_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_cost: u64,
    pub total: u64,
}

/// `unit_price × quantity` for a single order line.
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] if the product does not fit in `u64`.
pub fn line_subtotal(unit_price: u64, quantity: u32) -> Result<u64, TotalsError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(TotalsError::Overflow)
}

/// Tax owed on `subtotal` at `rate`, rounded to whole minor units.
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] if the result does not fit in `u64`.
pub fn tax_on(subtotal: u64, rate: Decimal) -> Result<u64, TotalsError> {
    Decimal::from(subtotal)
        .checked_mul(rate)
        .ok_or(TotalsError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(TotalsError::Overflow)
}

/// Aggregate line subtotals into order totals.
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] if any sum does not fit in `u64`.
pub fn compute_totals<I>(line_subtotals: I, settings: &OrderSettings) -> Result<OrderTotals, TotalsError>
where
    I: IntoIterator<Item = u64>,
{
    let subtotal = line_subtotals
        .into_iter()
        .try_fold(0_u64, u64::checked_add)
        .ok_or(TotalsError::Overflow)?;

    let tax = tax_on(subtotal, settings.tax_rate)?;
    let shipping_cost = settings.shipping_cost;

    let total = subtotal
        .checked_add(tax)
        .and_then(|sum| sum.checked_add(shipping_cost))
        .ok_or(TotalsError::Overflow)?;

    Ok(OrderTotals {
        subtotal,
        tax,
        shipping_cost,
        total,
    })
}
