use std::fmt;

use clap::Subcommand;
use jiff::Timestamp;
use storefront_app::{
    auth::{ApiTokenMetadata, PgAuthService},
    domain::users::records::UserUuid,
};
use uuid::Uuid;

use super::{CommandResult, DatabaseArgs};

#[derive(Debug, Subcommand)]
pub(super) enum TokenCommand {
    /// Issue a bearer token for a user; the token is printed once
    Create {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Owner of the new token
        #[arg(long)]
        user: Uuid,

        /// Expiry as an RFC 3339 timestamp
        #[arg(long, value_parser = parse_future_timestamp)]
        expires_at: Option<Timestamp>,
    },

    /// Show every token a user holds, including revoked ones
    List {
        #[command(flatten)]
        database: DatabaseArgs,

        #[arg(long)]
        user: Uuid,
    },

    /// Revoke a token by its UUID
    Revoke {
        #[command(flatten)]
        database: DatabaseArgs,

        #[arg(long)]
        token: Uuid,
    },
}

impl TokenCommand {
    pub(super) async fn run(self) -> CommandResult {
        match self {
            Self::Create {
                database,
                user,
                expires_at,
            } => {
                let auth = PgAuthService::new(database.connect().await?);

                let issued = auth
                    .issue_api_token(UserUuid::from_uuid(user), expires_at)
                    .await
                    .map_err(|error| format!("failed to issue token: {error}"))?;

                println!("{}", TokenSummary(&issued.metadata));
                println!();
                println!("{}", issued.token);
                println!();
                println!("copy the token above now; it cannot be shown again");
            }
            Self::List { database, user } => {
                let auth = PgAuthService::new(database.connect().await?);

                let tokens = auth
                    .list_api_tokens(UserUuid::from_uuid(user))
                    .await
                    .map_err(|error| format!("failed to list tokens: {error}"))?;

                if tokens.is_empty() {
                    println!("user {user} has no tokens");
                }

                for token in &tokens {
                    println!("{}", TokenSummary(token));
                }
            }
            Self::Revoke { database, token } => {
                let auth = PgAuthService::new(database.connect().await?);

                let revoked = auth
                    .revoke_api_token(token)
                    .await
                    .map_err(|error| format!("failed to revoke token: {error}"))?;

                if revoked {
                    println!("token {token} revoked");
                } else {
                    println!("token {token} is unknown or already revoked");
                }
            }
        }

        Ok(())
    }
}

fn parse_future_timestamp(raw: &str) -> Result<Timestamp, String> {
    let timestamp: Timestamp = raw
        .parse()
        .map_err(|error| format!("not an RFC 3339 timestamp: {error}"))?;

    if timestamp <= Timestamp::now() {
        return Err("expiry must be in the future".to_string());
    }

    Ok(timestamp)
}

/// One-line description of a token for terminal output.
struct TokenSummary<'a>(&'a ApiTokenMetadata);

impl fmt::Display for TokenSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.0;

        let state = match (token.revoked_at, token.expires_at) {
            (Some(revoked_at), _) => format!("revoked {revoked_at}"),
            (None, Some(expires_at)) if expires_at <= Timestamp::now() => {
                format!("expired {expires_at}")
            }
            (None, Some(expires_at)) => format!("expires {expires_at}"),
            (None, None) => "no expiry".to_string(),
        };

        let last_used = token
            .last_used_at
            .map_or_else(|| "never used".to_string(), |at| format!("last used {at}"));

        write!(
            f,
            "{} v{} user={} created {} | {state} | {last_used}",
            token.uuid,
            token.version.as_i16(),
            token.user_uuid,
            token.created_at,
        )
    }
}
