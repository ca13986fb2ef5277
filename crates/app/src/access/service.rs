//! Access service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    access::{
        errors::AccessServiceError,
        policy::{Action, Actor, Resource, authorize},
        roles::StoreRole,
    },
    database::Db,
    domain::{
        memberships::PgMembershipsRepository, stores::records::StoreUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccessService {
    db: Db,
    memberships: PgMembershipsRepository,
}

impl PgAccessService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            memberships: PgMembershipsRepository::new(),
        }
    }
}

#[async_trait]
impl AccessService for PgAccessService {
    async fn store_role(
        &self,
        user: UserUuid,
        store: StoreUuid,
    ) -> Result<Option<StoreRole>, AccessServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let role = self
            .memberships
            .find_store_role(&mut tx, user, store)
            .await?;

        tx.commit().await?;

        Ok(role)
    }

    async fn authorize(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), AccessServiceError> {
        let store_role = match resource.store() {
            Some(store) if !actor.is_admin() => self.store_role(actor.user, store).await?,
            _ => None,
        };

        authorize(&actor, store_role, &action, &resource).inspect_err(|_| {
            info!(
                user = %actor.user,
                role = %actor.role,
                ?action,
                ?resource,
                "access denied"
            );
        })
    }
}

#[automock]
#[async_trait]
pub trait AccessService: Send + Sync {
    /// Resolve the live membership role of a user in a store.
    async fn store_role(
        &self,
        user: UserUuid,
        store: StoreUuid,
    ) -> Result<Option<StoreRole>, AccessServiceError>;

    /// Allow or deny an action on a resource.
    async fn authorize(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), AccessServiceError>;
}
