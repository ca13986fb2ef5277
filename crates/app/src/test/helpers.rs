//! Test Helpers

use crate::{
    access::{Role, StoreRole},
    domain::{
        memberships::{
            MembershipsService, MembershipsServiceError,
            data::NewMembership,
            records::{MembershipRecord, MembershipUuid},
        },
        orders::{
            data::{CustomerDetails, NewOrder, NewOrderItem, ShippingAddress},
            records::OrderUuid,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        stores::{
            StoresService, StoresServiceError,
            data::NewStore,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

/// Create a user with a unique email address.
pub(crate) async fn create_user(
    ctx: &TestContext,
    role: Role,
) -> Result<UserRecord, UsersServiceError> {
    let uuid = UserUuid::new();

    ctx.users
        .create_user(NewUser {
            uuid,
            email: format!("{uuid}@hilo.test"),
            full_name: format!("Test {role}"),
            role,
        })
        .await
}

pub(crate) fn new_store(name: &str) -> NewStore {
    NewStore {
        uuid: StoreUuid::new(),
        name: name.to_string(),
        description: None,
        address: "Jr. de la Unión 456".to_string(),
        phone: "+51 1 555 0100".to_string(),
        email: None,
    }
}

pub(crate) async fn create_store(
    ctx: &TestContext,
    owner: UserUuid,
) -> Result<StoreRecord, StoresServiceError> {
    ctx.stores.create_store(owner, new_store("Hilo Mágico")).await
}

pub(crate) async fn add_member(
    ctx: &TestContext,
    store: StoreUuid,
    user: UserUuid,
    role: StoreRole,
) -> Result<MembershipRecord, MembershipsServiceError> {
    ctx.memberships
        .add_member(
            store,
            NewMembership {
                uuid: MembershipUuid::new(),
                user,
                role,
            },
        )
        .await
}

pub(crate) fn new_product(store: StoreUuid, price: u64, stock: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        store_uuid: store,
        name: "Ovillo de alpaca".to_string(),
        description: None,
        sku: None,
        price,
        stock,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    store: StoreUuid,
    price: u64,
    stock: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(store, price, stock))
        .await
}

pub(crate) fn new_order(
    store: StoreUuid,
    placed_by: Option<UserUuid>,
    items: Vec<NewOrderItem>,
) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        store,
        placed_by,
        customer: CustomerDetails {
            name: "María Quispe".to_string(),
            email: "maria@example.com".to_string(),
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
        items,
    }
}
