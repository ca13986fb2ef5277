//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Per-transaction lock timeout in milliseconds; 0 waits indefinitely
    #[arg(long, env = "DB_LOCK_TIMEOUT_MS", default_value_t = 0)]
    pub lock_timeout_ms: u64,
}
