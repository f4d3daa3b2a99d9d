use clap::Subcommand;
use storefront_app::domain::users::{
    PgUsersService, UsersService, data::NewUser, records::UserUuid,
};
use uuid::Uuid;

use super::{CommandResult, DatabaseArgs};

#[derive(Debug, Subcommand)]
pub(super) enum UserCommand {
    /// Register a shopper
    Create {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Display name
        #[arg(long)]
        name: String,

        /// Contact email; must be unique
        #[arg(long)]
        email: String,

        /// Explicit user UUID; a v7 UUID is generated when omitted
        #[arg(long)]
        uuid: Option<Uuid>,
    },
}

impl UserCommand {
    pub(super) async fn run(self) -> CommandResult {
        match self {
            Self::Create {
                database,
                name,
                email,
                uuid,
            } => {
                let users = PgUsersService::new(database.connect().await?);

                let user = users
                    .create_user(NewUser {
                        uuid: uuid.map(UserUuid::from_uuid).unwrap_or_default(),
                        name,
                        email,
                    })
                    .await
                    .map_err(|error| format!("failed to create user: {error}"))?;

                println!("created user {} <{}> ({})", user.name, user.email, user.uuid);

                Ok(())
            }
        }
    }
}
