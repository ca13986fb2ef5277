//! Server configuration module

use clap::Parser;
use hilo_app::{
    auth::JwtSecret,
    config::{AppSettings, AuthSettings, DatabaseSettings, OrderSettings, SettingsError},
};
use jiff::SignedDuration;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    orders::OrdersConfig,
    pagination::PaginationConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod orders;
pub(crate) mod pagination;
pub(crate) mod server;

/// Hilo JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "hilo-json", about = "Hilo Mágico JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Access token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Order pricing settings.
    #[command(flatten)]
    pub orders: OrdersConfig,

    /// List endpoint paging settings.
    #[command(flatten)]
    pub pagination: PaginationConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Validated settings handed to the application services.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is out of range.
    pub fn app_settings(&self) -> Result<AppSettings, SettingsError> {
        Ok(AppSettings {
            database: DatabaseSettings {
                url: self.database.database_url.clone(),
                lock_timeout_ms: self.database.lock_timeout_ms,
            },
            auth: AuthSettings::new(
                JwtSecret::new(self.auth.jwt_secret.clone()),
                SignedDuration::from_mins(self.auth.access_token_ttl_minutes),
            )?,
            orders: OrderSettings::new(self.orders.tax_rate, self.orders.shipping_cost)?,
        })
    }
}
