//! Stores service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    access::StoreRole,
    database::Db,
    domain::{
        memberships::{PgMembershipsRepository, data::NewMembership, records::MembershipUuid},
        stores::{
            data::{NewStore, StoreUpdate},
            errors::StoresServiceError,
            records::{StoreRecord, StoreUuid},
            repository::PgStoresRepository,
        },
        users::records::UserUuid,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgStoresService {
    db: Db,
    repository: PgStoresRepository,
    memberships: PgMembershipsRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStoresRepository::new(),
            memberships: PgMembershipsRepository::new(),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.trim().is_empty())
}

#[async_trait]
impl StoresService for PgStoresService {
    async fn create_store(
        &self,
        owner: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, StoresServiceError> {
        if [store.name.as_str(), store.address.as_str(), store.phone.as_str()]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(StoresServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_store(&mut tx, store).await?;

        self.memberships
            .create_membership(
                &mut tx,
                created.uuid,
                NewMembership {
                    uuid: MembershipUuid::new(),
                    user: owner,
                    role: StoreRole::Owner,
                },
            )
            .await?;

        tx.commit().await?;

        info!(store = %created.uuid, owner = %owner, "store created");

        Ok(created)
    }

    async fn get_store(&self, store: StoreUuid) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = self.repository.get_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(store)
    }

    async fn list_stores(
        &self,
        member: Option<UserUuid>,
        page: Page,
    ) -> Result<Vec<StoreRecord>, StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stores = self.repository.list_stores(&mut tx, member, page).await?;

        tx.commit().await?;

        Ok(stores)
    }

    async fn update_store(
        &self,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, StoresServiceError> {
        if update.is_empty() {
            return Err(StoresServiceError::EmptyUpdate);
        }

        if is_blank(update.name.as_deref())
            || is_blank(update.address.as_deref())
            || is_blank(update.phone.as_deref())
        {
            return Err(StoresServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_store(&mut tx, store, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_store(&self, store: StoreUuid) -> Result<(), StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_store(&mut tx, store).await?;

        if rows_affected == 0 {
            return Err(StoresServiceError::NotFound);
        }

        tx.commit().await?;

        info!(store = %store, "store deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Creates a store and makes `owner` its owning member.
    async fn create_store(
        &self,
        owner: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, StoresServiceError>;

    /// Retrieve a single store.
    async fn get_store(&self, store: StoreUuid) -> Result<StoreRecord, StoresServiceError>;

    /// List stores, restricted to those `member` belongs to when given.
    async fn list_stores(
        &self,
        member: Option<UserUuid>,
        page: Page,
    ) -> Result<Vec<StoreRecord>, StoresServiceError>;

    /// Apply a partial update.
    async fn update_store(
        &self,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, StoresServiceError>;

    /// Soft-delete a store.
    async fn delete_store(&self, store: StoreUuid) -> Result<(), StoresServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        access::{AccessService, Role},
        test::{
            TestContext,
            helpers::{create_store, create_user, new_store},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_store_makes_creator_the_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, Role::Owner).await?;
        let data = new_store("Hilo Centro");
        let uuid = data.uuid;

        let store = ctx.stores.create_store(owner.uuid, data).await?;

        assert_eq!(store.uuid, uuid);
        assert_eq!(store.name, "Hilo Centro");
        assert!(store.is_active);

        let role = ctx.access.store_role(owner.uuid, store.uuid).await?;

        assert_eq!(role, Some(StoreRole::Owner));

        Ok(())
    }

    #[tokio::test]
    async fn create_store_unknown_owner_rolls_back() -> TestResult {
        let ctx = TestContext::new().await;
        let data = new_store("Orphan");
        let uuid = data.uuid;

        let result = ctx.stores.create_store(UserUuid::new(), data).await;

        assert!(
            matches!(result, Err(StoresServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        let lookup = ctx.stores.get_store(uuid).await;

        assert!(
            matches!(lookup, Err(StoresServiceError::NotFound)),
            "store insert should have rolled back, got {lookup:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_store_blank_name_returns_missing_required_data() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, Role::Owner).await?;

        let result = ctx.stores.create_store(owner.uuid, new_store(" ")).await;

        assert!(
            matches!(result, Err(StoresServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_stores_scoped_to_member() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = create_user(&ctx, Role::Owner).await?;
        let bob = create_user(&ctx, Role::Owner).await?;

        let alice_store = create_store(&ctx, alice.uuid).await?;
        let bob_store = create_store(&ctx, bob.uuid).await?;

        let scoped = ctx
            .stores
            .list_stores(Some(alice.uuid), Page::default())
            .await?;

        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].uuid, alice_store.uuid);

        let all = ctx.stores.list_stores(None, Page::default()).await?;
        let uuids: Vec<StoreUuid> = all.iter().map(|s| s.uuid).collect();

        assert!(uuids.contains(&alice_store.uuid));
        assert!(uuids.contains(&bob_store.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_stores_applies_page_window() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, Role::Owner).await?;

        for _ in 0..3 {
            create_store(&ctx, owner.uuid).await?;
        }

        let first = ctx.stores.list_stores(None, Page::new(0, 2)).await?;
        let rest = ctx.stores.list_stores(None, Page::new(2, 2)).await?;

        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_store_changes_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, Role::Owner).await?;
        let store = create_store(&ctx, owner.uuid).await?;

        let updated = ctx
            .stores
            .update_store(
                store.uuid,
                StoreUpdate {
                    phone: Some("555-0199".to_string()),
                    ..StoreUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.name, store.name);
        assert_eq!(updated.address, store.address);

        Ok(())
    }

    #[tokio::test]
    async fn update_store_empty_update_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, Role::Owner).await?;
        let store = create_store(&ctx, owner.uuid).await?;

        let result = ctx
            .stores
            .update_store(store.uuid, StoreUpdate::default())
            .await;

        assert!(
            matches!(result, Err(StoresServiceError::EmptyUpdate)),
            "expected EmptyUpdate, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_store_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, Role::Owner).await?;
        let store = create_store(&ctx, owner.uuid).await?;

        ctx.stores.delete_store(store.uuid).await?;

        let result = ctx.stores.get_store(store.uuid).await;

        assert!(
            matches!(result, Err(StoresServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let again = ctx.stores.delete_store(store.uuid).await;

        assert!(
            matches!(again, Err(StoresServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }
}
