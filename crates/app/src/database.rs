//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query};

/// SQL used to apply a transaction-scoped lock timeout.
pub const SET_LOCK_TIMEOUT_SQL: &str = "SELECT set_config('lock_timeout', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout_ms: 0,
        }
    }

    /// Apply `lock_timeout` to every transaction started through this handle.
    #[must_use]
    pub fn with_lock_timeout(mut self, lock_timeout_ms: u64) -> Self {
        self.lock_timeout_ms = lock_timeout_ms;
        self
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction, applying the configured lock timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the timeout fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        if self.lock_timeout_ms > 0 {
            query(SET_LOCK_TIMEOUT_SQL)
                .bind(format!("{}ms", self.lock_timeout_ms))
                .execute(&mut *tx)
                .await?;
        }

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
