//! Auth service errors.

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The presented token is malformed, unknown, revoked or expired.
    #[error("api token not recognised")]
    NotFound,

    /// A token was requested for a user that does not exist.
    #[error("no such user")]
    UnknownUser,

    #[error("auth storage failed")]
    Sql(#[source] sqlx::Error),

    #[error("api token could not be processed")]
    Token(#[from] ApiTokenError),
}

impl From<sqlx::Error> for AuthServiceError {
    fn from(error: sqlx::Error) -> Self {
        let foreign_key_violation = error
            .as_database_error()
            .is_some_and(|db| matches!(db.kind(), ErrorKind::ForeignKeyViolation));

        if foreign_key_violation {
            Self::UnknownUser
        } else {
            Self::Sql(error)
        }
    }
}
