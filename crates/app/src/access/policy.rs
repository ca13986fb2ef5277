//! Access Policy
//!
//! Pure rules deciding whether an actor may perform an action. Membership
//! lookup happens in [`AccessService`](super::AccessService); everything here
//! is side-effect free.

use crate::{
    access::{
        errors::AccessServiceError,
        roles::{Role, StoreRole},
    },
    domain::{
        stores::{data::StoreField, records::StoreUuid},
        users::records::UserUuid,
    },
};

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user: UserUuid,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(user: UserUuid, role: Role) -> Self {
        Self { user, role }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateStore,
    ReadStore,
    UpdateStore { fields: Vec<StoreField> },
    DeleteStore,
    AddMember,
    ChangeMemberRole,
    RemoveMember { member: UserUuid },
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    AdjustStock,
    CreateOrder,
    ReadOrder,
    UpdateOrder,
    ListOrders,
    ManageUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Platform,
    Store(StoreUuid),
    Order {
        store: StoreUuid,
        placed_by: Option<UserUuid>,
    },
}

impl Resource {
    /// Store whose membership governs access, if any.
    #[must_use]
    pub const fn store(&self) -> Option<StoreUuid> {
        match self {
            Self::Platform => None,
            Self::Store(store) | Self::Order { store, .. } => Some(*store),
        }
    }
}

/// Fields a manager or staff member may change on their store.
pub const STAFF_EDITABLE_STORE_FIELDS: [StoreField; 3] =
    [StoreField::Description, StoreField::Phone, StoreField::Email];

/// Decide whether `actor`, holding `store_role` in the resource's store, may
/// perform `action`.
///
/// # Errors
///
/// Returns [`AccessServiceError::Forbidden`] when the action is not permitted.
pub fn authorize(
    actor: &Actor,
    store_role: Option<StoreRole>,
    action: &Action,
    resource: &Resource,
) -> Result<(), AccessServiceError> {
    if actor.is_admin() || permits(actor, store_role, action, resource) {
        return Ok(());
    }

    Err(AccessServiceError::Forbidden)
}

fn permits(
    actor: &Actor,
    store_role: Option<StoreRole>,
    action: &Action,
    resource: &Resource,
) -> bool {
    use StoreRole::{Admin, Manager, Owner, Staff, Viewer};

    match action {
        Action::CreateStore => matches!(actor.role, Role::Owner | Role::Seller),
        Action::CreateOrder => true,
        Action::ReadOrder | Action::UpdateOrder => {
            let placed_by_actor = matches!(
                resource,
                Resource::Order { placed_by: Some(user), .. } if *user == actor.user
            );

            placed_by_actor || matches!(store_role, Some(Owner | Admin))
        }
        Action::RemoveMember { member } => {
            (*member == actor.user && store_role.is_some()) || store_role == Some(Owner)
        }
        Action::ReadStore => store_role.is_some(),
        Action::UpdateStore { fields } => match store_role {
            Some(Owner | Admin) => true,
            Some(Manager | Staff) => fields
                .iter()
                .all(|field| STAFF_EDITABLE_STORE_FIELDS.contains(field)),
            Some(Viewer) | None => false,
        },
        Action::DeleteStore | Action::ChangeMemberRole => store_role == Some(Owner),
        Action::AddMember | Action::ListOrders => matches!(store_role, Some(Owner | Admin)),
        Action::CreateProduct | Action::UpdateProduct | Action::DeleteProduct => {
            matches!(store_role, Some(Owner | Admin | Manager))
        }
        Action::AdjustStock => matches!(store_role, Some(Owner | Admin | Manager | Staff)),
        Action::ManageUsers => false,
    }
}
