//! Test helpers.

use std::sync::Arc;

use hilo_app::{
    access::{AccessServiceError, Action, Actor, MockAccessService, Resource, Role, StoreRole},
    auth::MockAuthService,
    context::AppContext,
    domain::{
        memberships::{
            MockMembershipsService,
            records::{MembershipRecord, MembershipUuid},
        },
        orders::{
            MockOrdersService,
            data::{CustomerDetails, ShippingAddress},
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            status::OrderStatus,
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        stores::{
            MockStoresService,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{config::pagination::PaginationConfig, extensions::*, state::State};

pub(crate) const TEST_ACTOR: Actor =
    Actor::new(UserUuid::from_uuid(Uuid::nil()), Role::Customer);

pub(crate) const TEST_ADMIN: Actor = Actor::new(UserUuid::from_uuid(Uuid::from_u128(1)), Role::Admin);

struct InjectActor(Actor);

#[salvo::handler]
impl InjectActor {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_actor(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Mocked services behind a handler under test.
pub(crate) struct TestApp {
    pub(crate) users: MockUsersService,
    pub(crate) stores: MockStoresService,
    pub(crate) memberships: MockMembershipsService,
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) access: MockAccessService,
    pub(crate) auth: MockAuthService,
    pub(crate) actor: Actor,
}

impl Default for TestApp {
    fn default() -> Self {
        Self {
            users: strict_users_mock(),
            stores: strict_stores_mock(),
            memberships: strict_memberships_mock(),
            products: strict_products_mock(),
            orders: strict_orders_mock(),
            access: strict_access_mock(),
            auth: strict_auth_mock(),
            actor: TEST_ACTOR,
        }
    }
}

impl TestApp {
    pub(crate) fn state(self) -> Arc<State> {
        State::from_app_context(
            AppContext {
                users: Arc::new(self.users),
                stores: Arc::new(self.stores),
                memberships: Arc::new(self.memberships),
                products: Arc::new(self.products),
                orders: Arc::new(self.orders),
                access: Arc::new(self.access),
                auth: Arc::new(self.auth),
            },
            PaginationConfig::default(),
        )
    }

    /// Serve `route` as the configured actor.
    pub(crate) fn service(self, route: Router) -> Service {
        let actor = self.actor;

        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(InjectActor(actor))
                .push(route),
        )
    }
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();
    users.expect_list_users().never();
    users.expect_update_user().never();
    users.expect_delete_user().never();

    users
}

fn strict_stores_mock() -> MockStoresService {
    let mut stores = MockStoresService::new();

    stores.expect_create_store().never();
    stores.expect_get_store().never();
    stores.expect_list_stores().never();
    stores.expect_update_store().never();
    stores.expect_delete_store().never();

    stores
}

fn strict_memberships_mock() -> MockMembershipsService {
    let mut memberships = MockMembershipsService::new();

    memberships.expect_add_member().never();
    memberships.expect_list_members().never();
    memberships.expect_change_role().never();
    memberships.expect_remove_member().never();

    memberships
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_adjust_stock().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_update_order_status().never();

    orders
}

fn strict_access_mock() -> MockAccessService {
    let mut access = MockAccessService::new();

    access.expect_store_role().never();
    access.expect_authorize().never();

    access
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_issue_access_token().never();

    auth
}

/// Expect exactly one access check for `action` on `resource`, and allow it.
pub(crate) fn expect_access(action: Action, resource: Resource) -> MockAccessService {
    let mut access = MockAccessService::new();

    access.expect_store_role().never();
    access
        .expect_authorize()
        .once()
        .withf(move |_, a, r| *a == action && *r == resource)
        .return_once(|_, _, _| Ok(()));

    access
}

/// Deny every access check.
pub(crate) fn deny_access() -> MockAccessService {
    let mut access = MockAccessService::new();

    access.expect_store_role().never();
    access
        .expect_authorize()
        .returning(|_, _, _| Err(AccessServiceError::Forbidden));

    access
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        email: format!("{uuid}@hilo.test"),
        full_name: "Rosa Quispe".to_string(),
        role: Role::Customer,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_store(uuid: StoreUuid) -> StoreRecord {
    StoreRecord {
        uuid,
        name: "Hilo Mágico".to_string(),
        description: None,
        address: "Jr. de la Unión 100, Lima".to_string(),
        phone: "+51 1 555 0100".to_string(),
        email: Some("tienda@hilo.test".to_string()),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_membership(store: StoreUuid, user: UserUuid, role: StoreRole) -> MembershipRecord {
    MembershipRecord {
        uuid: MembershipUuid::new(),
        user_uuid: user,
        store_uuid: store,
        role,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, store: StoreUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        store_uuid: store,
        name: "Ovillo de alpaca".to_string(),
        description: None,
        sku: Some("ALP-001".to_string()),
        price: 1500,
        stock: 10,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// An order for three units at 15.00 with 18% tax.
pub(crate) fn make_order(uuid: OrderUuid, store: StoreUuid, placed_by: Option<UserUuid>) -> OrderRecord {
    OrderRecord {
        uuid,
        order_number: "ORD-19700101-00001".to_string(),
        store_uuid: store,
        placed_by,
        customer: CustomerDetails {
            name: "Rosa Quispe".to_string(),
            email: "rosa@hilo.test".to_string(),
            phone: None,
        },
        shipping_address: ShippingAddress {
            street: "Av. Arequipa 1234".to_string(),
            city: "Lima".to_string(),
            state: "Lima".to_string(),
            postal_code: "15046".to_string(),
            country: "PE".to_string(),
        },
        notes: None,
        subtotal: 4500,
        tax: 810,
        shipping_cost: 0,
        total: 5310,
        status: OrderStatus::Pending,
        is_paid: false,
        paid_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            quantity: 3,
            unit_price: 1500,
            subtotal: 4500,
            created_at: Timestamp::UNIX_EPOCH,
        }],
    }
}
