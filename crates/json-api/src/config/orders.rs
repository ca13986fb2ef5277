//! Orders Config

use clap::Args;
use rust_decimal::Decimal;

/// Order pricing settings.
#[derive(Debug, Args)]
pub struct OrdersConfig {
    /// Tax rate applied to order subtotals, e.g. 0.18
    #[arg(long, env = "TAX_RATE", default_value = "0.18")]
    pub tax_rate: Decimal,

    /// Flat shipping cost in minor units
    #[arg(long, env = "SHIPPING_COST", default_value_t = 0)]
    pub shipping_cost: u64,
}
