use clap::Subcommand;
use storefront_app::database;

use super::{CommandResult, DatabaseArgs};

#[derive(Debug, Subcommand)]
pub(super) enum DbCommand {
    /// Apply pending schema migrations
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

impl DbCommand {
    pub(super) async fn run(self) -> CommandResult {
        match self {
            Self::Migrate { database } => {
                let pool = database.connect().await?;

                database::migrate(&pool)
                    .await
                    .map_err(|error| format!("failed to apply migrations: {error}"))?;

                println!("migrations applied");

                Ok(())
            }
        }
    }
}
