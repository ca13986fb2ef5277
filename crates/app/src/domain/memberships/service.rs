//! Memberships service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    access::StoreRole,
    database::Db,
    domain::{
        memberships::{
            data::NewMembership, errors::MembershipsServiceError, records::MembershipRecord,
            repository::PgMembershipsRepository,
        },
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgMembershipsService {
    db: Db,
    repository: PgMembershipsRepository,
}

impl PgMembershipsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMembershipsRepository::new(),
        }
    }
}

#[async_trait]
impl MembershipsService for PgMembershipsService {
    async fn add_member(
        &self,
        store: StoreUuid,
        membership: NewMembership,
    ) -> Result<MembershipRecord, MembershipsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_membership(&mut tx, store, membership)
            .await?;

        tx.commit().await?;

        info!(store = %store, user = %created.user_uuid, role = %created.role, "member added");

        Ok(created)
    }

    async fn list_members(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<MembershipRecord>, MembershipsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let members = self.repository.list_memberships(&mut tx, store).await?;

        tx.commit().await?;

        Ok(members)
    }

    async fn change_role(
        &self,
        store: StoreUuid,
        user: UserUuid,
        role: StoreRole,
    ) -> Result<MembershipRecord, MembershipsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_membership_role(&mut tx, store, user, role)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_member(
        &self,
        store: StoreUuid,
        user: UserUuid,
    ) -> Result<(), MembershipsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_membership(&mut tx, store, user).await?;

        if rows_affected == 0 {
            return Err(MembershipsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(store = %store, user = %user, "member removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MembershipsService: Send + Sync {
    /// Adds a user to a store; a live duplicate is rejected.
    async fn add_member(
        &self,
        store: StoreUuid,
        membership: NewMembership,
    ) -> Result<MembershipRecord, MembershipsServiceError>;

    /// Lists live memberships of a store.
    async fn list_members(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<MembershipRecord>, MembershipsServiceError>;

    /// Changes a member's store role.
    async fn change_role(
        &self,
        store: StoreUuid,
        user: UserUuid,
        role: StoreRole,
    ) -> Result<MembershipRecord, MembershipsServiceError>;

    /// Soft-deletes a membership.
    async fn remove_member(
        &self,
        store: StoreUuid,
        user: UserUuid,
    ) -> Result<(), MembershipsServiceError>;
}
