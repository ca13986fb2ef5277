//! Auth Config

use clap::Args;

/// Access token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC key used to verify bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued access tokens in minutes
    #[arg(long, env = "ACCESS_TOKEN_TTL_MINUTES", default_value_t = 60 * 24 * 7)]
    pub access_token_ttl_minutes: i64,
}
