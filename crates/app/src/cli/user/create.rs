use clap::Args;
use hilo_app::{
    access::Role,
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::UserUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Login email, unique across live users
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Platform role: admin, owner, seller or customer
    #[arg(long, default_value = "customer")]
    role: Role,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            email: args.email,
            full_name: args.name,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
