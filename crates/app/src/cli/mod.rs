use clap::{Parser, Subcommand};

mod store;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "hilo-app", about = "Hilo Mágico CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Store(store::StoreCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Store(command) => store::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}
