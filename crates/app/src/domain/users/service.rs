//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.email.trim().is_empty() || user.full_name.trim().is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self, page: Page) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let users = self.repository.list_users(&mut tx, page).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        if update.is_empty() {
            return Err(UsersServiceError::EmptyUpdate);
        }

        let blank = |value: Option<&str>| value.is_some_and(|value| value.trim().is_empty());

        if blank(update.email.as_deref()) || blank(update.full_name.as_deref()) {
            return Err(UsersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_user(&mut tx, user, update).await?;

        tx.commit().await?;

        info!(user = %user, role = %updated.role, is_active = updated.is_active, "user updated");

        Ok(updated)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(user = %user, "user deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single, non-deleted user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// List live users, newest first.
    async fn list_users(&self, page: Page) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Apply a partial update, including role changes and deactivation.
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Soft-delete a user. Deleted users can no longer authenticate.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{access::Role, test::TestContext};

    use super::*;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            email: email.to_string(),
            full_name: "Ana Pérez".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn create_user_persists_role_and_normalises_email() -> TestResult {
        let ctx = TestContext::new().await;
        let user = new_user(" Ana@Example.com ", Role::Seller);
        let uuid = user.uuid;

        let created = ctx.users.create_user(user).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.email, "ana@example.com");
        assert_eq!(created.role, Role::Seller);
        assert!(created.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(new_user("dup@example.com", Role::Customer))
            .await?;

        let result = ctx
            .users
            .create_user(new_user("DUP@example.com", Role::Customer))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_blank_name_returns_missing_required_data() {
        let ctx = TestContext::new().await;
        let mut user = new_user("blank@example.com", Role::Customer);
        user.full_name = "  ".to_string();

        let result = ctx.users.create_user(user).await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_users_pages_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .users
            .create_user(new_user("first@example.com", Role::Customer))
            .await?;
        let second = ctx
            .users
            .create_user(new_user("second@example.com", Role::Seller))
            .await?;

        let users = ctx.users.list_users(Page::new(0, 10)).await?;
        let uuids: Vec<UserUuid> = users.iter().map(|user| user.uuid).collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);

        let page = ctx.users.list_users(Page::new(1, 1)).await?;

        assert_eq!(page.first().map(|user| user.uuid), Some(first.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn update_user_changes_role_and_deactivates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .create_user(new_user("promote@example.com", Role::Customer))
            .await?;

        let updated = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    role: Some(Role::Seller),
                    is_active: Some(false),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.role, Role::Seller);
        assert!(!updated.is_active);
        assert_eq!(updated.email, "promote@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn update_user_rejects_empty_and_blank_updates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .create_user(new_user("blanks@example.com", Role::Customer))
            .await?;

        let empty = ctx.users.update_user(user.uuid, UserUpdate::default()).await;

        assert!(
            matches!(empty, Err(UsersServiceError::EmptyUpdate)),
            "expected EmptyUpdate, got {empty:?}"
        );

        let blank = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    full_name: Some(" ".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(blank, Err(UsersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {blank:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_user_to_taken_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(new_user("taken@example.com", Role::Customer))
            .await?;
        let user = ctx
            .users
            .create_user(new_user("free@example.com", Role::Customer))
            .await?;

        let result = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    email: Some("Taken@Example.com".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_hides_user_and_second_delete_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .create_user(new_user("gone@example.com", Role::Customer))
            .await?;

        ctx.users.delete_user(user.uuid).await?;

        let fetched = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(fetched, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {fetched:?}"
        );

        let again = ctx.users.delete_user(user.uuid).await;

        assert!(
            matches!(again, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        let listed = ctx.users.list_users(Page::default()).await?;

        assert!(listed.iter().all(|listed| listed.uuid != user.uuid));

        Ok(())
    }
}
