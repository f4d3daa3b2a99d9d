//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        ApiToken, ApiTokenMetadata, AuthServiceError, IssuedApiToken, models::NewApiToken,
        repository::PgAuthRepository, verifier_matches,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// The raw token is only ever returned here.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = ApiToken::generate();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.uuid,
                user_uuid,
                version: token.version,
                token_hash: token.verifier(user_uuid),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken {
            token: token.to_string(),
            metadata,
        })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user_uuid)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let presented: ApiToken = bearer_token.parse().or(Err(AuthServiceError::NotFound))?;

        let stored = self
            .repository
            .find_active_api_token_by_uuid(presented.uuid, presented.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if !verifier_matches(&presented.verifier(stored.user_uuid), &stored.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Last-used tracking never fails an otherwise valid request.
        if let Err(error) = self.repository.touch_api_token_last_used(presented.uuid).await {
            warn!(token_uuid = %presented.uuid, "failed to record token use: {error}");
        }

        Ok(stored.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    ///
    /// Malformed, unknown, revoked and expired tokens all fail with
    /// [`AuthServiceError::NotFound`].
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
