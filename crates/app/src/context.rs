//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    access::{AccessService, PgAccessService},
    auth::{AuthService, PgAuthService},
    config::AppSettings,
    database::{self, Db},
    domain::{
        memberships::{MembershipsService, PgMembershipsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        stores::{PgStoresService, StoresService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Service handles shared by every transport.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub stores: Arc<dyn StoresService>,
    pub memberships: Arc<dyn MembershipsService>,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub access: Arc<dyn AccessService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect to the database and build every service from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database.url)
            .await
            .map_err(AppInitError::Database)?;

        info!(
            lock_timeout_ms = settings.database.lock_timeout_ms,
            "database pool ready"
        );

        Ok(Self::from_db(
            &Db::new(pool).with_lock_timeout(settings.database.lock_timeout_ms),
            settings,
        ))
    }

    /// Build the services over an existing database handle.
    #[must_use]
    pub fn from_db(db: &Db, settings: &AppSettings) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            stores: Arc::new(PgStoresService::new(db.clone())),
            memberships: Arc::new(PgMembershipsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), settings.orders)),
            access: Arc::new(PgAccessService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), settings.auth.clone())),
        }
    }
}
