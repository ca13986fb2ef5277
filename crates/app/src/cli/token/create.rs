use clap::Args;
use hilo_app::{
    auth::{AuthService, JwtSecret, PgAuthService},
    config::AuthSettings,
    database::{self, Db},
    domain::users::records::UserUuid,
};
use jiff::SignedDuration;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// HMAC key shared with the HTTP server
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Token lifetime in minutes
    #[arg(long, env = "ACCESS_TOKEN_TTL_MINUTES", default_value_t = 60 * 24 * 7)]
    ttl_minutes: i64,

    /// User the token authenticates as
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let settings = AuthSettings::new(
        JwtSecret::new(args.jwt_secret),
        SignedDuration::from_mins(args.ttl_minutes),
    )
    .map_err(|error| format!("invalid auth settings: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool), settings);

    let issued = service
        .issue_access_token(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("user_uuid: {}", args.user_uuid);
    println!("token_expires_at: {}", issued.expires_at);
    println!("access_token: {}", issued.token);

    Ok(())
}
