//! Application Settings
//!
//! Built once at process start by the binary that owns the process and handed
//! to [`AppContext::from_settings`](crate::context::AppContext::from_settings).

use jiff::SignedDuration;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::auth::JwtSecret;

/// Default tax rate applied to order subtotals (18%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Default access token lifetime (7 days).
pub const DEFAULT_ACCESS_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24 * 7);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("tax rate must not be negative")]
    NegativeTaxRate,

    #[error("access token lifetime must be positive")]
    NonPositiveTokenTtl,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub orders: OrderSettings,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,

    /// Per-transaction `lock_timeout`; zero disables it.
    pub lock_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: JwtSecret,
    pub access_token_ttl: SignedDuration,
}

impl AuthSettings {
    /// Build auth settings, rejecting non-positive token lifetimes.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositiveTokenTtl`] when `access_token_ttl` is zero or negative.
    pub fn new(
        jwt_secret: JwtSecret,
        access_token_ttl: SignedDuration,
    ) -> Result<Self, SettingsError> {
        if !access_token_ttl.is_positive() {
            return Err(SettingsError::NonPositiveTokenTtl);
        }

        Ok(Self {
            jwt_secret,
            access_token_ttl,
        })
    }
}

/// Pricing inputs for new orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSettings {
    pub tax_rate: Decimal,

    /// Flat shipping cost in minor units.
    pub shipping_cost: u64,
}

impl OrderSettings {
    /// # Errors
    ///
    /// Returns [`SettingsError::NegativeTaxRate`] when `tax_rate` is below zero.
    pub fn new(tax_rate: Decimal, shipping_cost: u64) -> Result<Self, SettingsError> {
        if tax_rate < Decimal::ZERO {
            return Err(SettingsError::NegativeTaxRate);
        }

        Ok(Self {
            tax_rate,
            shipping_cost,
        })
    }
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            shipping_cost: 0,
        }
    }
}
