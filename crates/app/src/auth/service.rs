//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    access::Actor,
    auth::{AccessClaims, AuthServiceError, decode_access_token, encode_access_token},
    config::AuthSettings,
    database::Db,
    domain::users::{PgUsersRepository, records::UserUuid},
};

/// Freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    settings: AuthSettings,
    users_repository: PgUsersRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, settings: AuthSettings) -> Self {
        Self {
            db,
            settings,
            users_repository: PgUsersRepository::new(),
        }
    }

    /// Load the user and fail unless it may still authenticate.
    async fn active_actor(&self, user: UserUuid) -> Result<Actor, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = match self.users_repository.get_user(&mut tx, user).await {
            Ok(record) => record,
            Err(sqlx::Error::RowNotFound) => return Err(AuthServiceError::UnknownUser),
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        if !record.is_active {
            return Err(AuthServiceError::UnknownUser);
        }

        Ok(Actor::new(record.uuid, record.role))
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let claims = decode_access_token(&self.settings.jwt_secret, bearer_token)?;

        self.active_actor(UserUuid::from_uuid(claims.sub)).await
    }

    async fn issue_access_token(
        &self,
        user: UserUuid,
    ) -> Result<IssuedAccessToken, AuthServiceError> {
        let actor = self.active_actor(user).await?;

        let claims = AccessClaims::new(
            actor.user.into_uuid(),
            Timestamp::now(),
            self.settings.access_token_ttl,
        );

        let token = encode_access_token(&self.settings.jwt_secret, &claims)?;
        let expires_at = claims.expires_at()?;

        info!(user = %actor.user, role = %actor.role, "access token issued");

        Ok(IssuedAccessToken { token, expires_at })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the acting user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;

    /// Sign a new access token for an active user.
    async fn issue_access_token(
        &self,
        user: UserUuid,
    ) -> Result<IssuedAccessToken, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        access::Role,
        auth::{JwtSecret, encode_access_token},
        domain::users::{UsersService, data::UserUpdate},
        test::{TEST_JWT_SECRET, TestContext, helpers::create_user},
    };

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, Role::Seller).await?;

        let issued = ctx.auth.issue_access_token(user.uuid).await?;
        let actor = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(actor, Actor::new(user.uuid, Role::Seller));
        assert!(issued.expires_at > Timestamp::now());

        Ok(())
    }

    #[tokio::test]
    async fn issue_for_unknown_user_fails() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_access_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_for_missing_user_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let claims = AccessClaims::new(
            UserUuid::new().into_uuid(),
            Timestamp::now(),
            SignedDuration::from_hours(1),
        );
        let token = encode_access_token(&JwtSecret::new(TEST_JWT_SECRET), &claims)?;

        let result = ctx.auth.authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_user_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, Role::Customer).await?;
        let issued = ctx.auth.issue_access_token(user.uuid).await?;

        ctx.users
            .update_user(
                user.uuid,
                UserUpdate {
                    is_active: Some(false),
                    ..UserUpdate::default()
                },
            )
            .await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_user_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, Role::Customer).await?;
        let issued = ctx.auth.issue_access_token(user.uuid).await?;

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, Role::Customer).await?;
        let claims = AccessClaims::new(
            user.uuid.into_uuid(),
            Timestamp::now(),
            SignedDuration::from_hours(1),
        );
        let token = encode_access_token(&JwtSecret::new("not-the-server-secret"), &claims)?;

        let result = ctx.auth.authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, Role::Customer).await?;
        let claims = AccessClaims::new(
            user.uuid.into_uuid(),
            Timestamp::now() - SignedDuration::from_hours(2),
            SignedDuration::from_mins(30),
        );
        let token = encode_access_token(&JwtSecret::new(TEST_JWT_SECRET), &claims)?;

        let result = ctx.auth.authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::ExpiredToken)),
            "expected ExpiredToken, got {result:?}"
        );

        Ok(())
    }
}
