//! Order Numbers
//!
//! `ORD-<YYYYMMDD>-<NNNNN>`: the UTC calendar day plus a per-day counter,
//! zero padded to five digits.

use jiff::{Timestamp, civil::Date, tz::TimeZone};

pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Counter key for the UTC day containing `at`.
#[must_use]
pub fn day_key(at: Timestamp) -> String {
    format_day(at.to_zoned(TimeZone::UTC).date())
}

#[must_use]
pub fn format_day(date: Date) -> String {
    date.strftime("%Y%m%d").to_string()
}

/// Render an order number from a day key and that day's sequence value.
#[must_use]
pub fn format_order_number(day: &str, sequence: u64) -> String {
    format!("{ORDER_NUMBER_PREFIX}-{day}-{sequence:05}")
}
