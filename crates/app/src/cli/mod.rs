use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use storefront_app::database;

mod db;
mod token;
mod user;

/// Outcome of a CLI command; the error is printed verbatim.
type CommandResult = Result<(), String>;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    #[command(subcommand)]
    Db(db::DbCommand),

    /// Manage shoppers
    #[command(subcommand)]
    User(user::UserCommand),

    /// Issue and revoke API tokens
    #[command(subcommand)]
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> CommandResult {
        match self.command {
            Commands::Db(command) => command.run().await,
            Commands::User(command) => command.run().await,
            Commands::Token(command) => command.run().await,
        }
    }
}

/// Connection flags shared by every command that touches the database.
#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
