use clap::Args;
use hilo_app::{
    database::{self, Db},
    domain::{
        stores::{PgStoresService, StoresService, data::NewStore, records::StoreUuid},
        users::records::UserUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateStoreArgs {
    /// Store display name
    #[arg(long)]
    name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// User that becomes the store owner
    #[arg(long)]
    owner_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateStoreArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgStoresService::new(Db::new(pool));

    let store = service
        .create_store(
            UserUuid::from_uuid(args.owner_uuid),
            NewStore {
                uuid: StoreUuid::new(),
                name: args.name,
                description: args.description,
                address: args.address,
                phone: args.phone,
                email: args.email,
            },
        )
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_uuid: {}", store.uuid);
    println!("store_name: {}", store.name);
    println!("owner_uuid: {}", args.owner_uuid);

    Ok(())
}
