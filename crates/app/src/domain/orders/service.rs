//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    config::OrderSettings,
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, OrderFilter, OrderStatusUpdate},
            errors::OrdersServiceError,
            numbering::{day_key, format_order_number},
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repositories::{
                OrderChanges, PgOrderItemsRepository, PgOrderSequencesRepository,
                PgOrdersRepository,
            },
            status::OrderStatus,
            totals::{compute_totals, line_subtotal},
        },
        products::{
            PgProductsRepository,
            records::{ProductRecord, ProductUuid},
        },
        stores::PgStoresRepository,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    settings: OrderSettings,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    sequences_repository: PgOrderSequencesRepository,
    products_repository: PgProductsRepository,
    stores_repository: PgStoresRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, settings: OrderSettings) -> Self {
        Self {
            db,
            settings,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            sequences_repository: PgOrderSequencesRepository::new(),
            products_repository: PgProductsRepository::new(),
            stores_repository: PgStoresRepository::new(),
        }
    }
}

/// Reject malformed orders before touching the database.
fn validate_new_order(order: &NewOrder) -> Result<(), OrdersServiceError> {
    if order.items.is_empty() {
        return Err(OrdersServiceError::EmptyOrder);
    }

    if let Some(item) = order.items.iter().find(|item| item.quantity == 0) {
        return Err(OrdersServiceError::InvalidQuantity(item.product));
    }

    if order.customer.name.trim().is_empty() {
        return Err(OrdersServiceError::MissingField("customer_name"));
    }

    if order.customer.email.trim().is_empty() {
        return Err(OrdersServiceError::MissingField("customer_email"));
    }

    if let Some(field) = order.shipping_address.first_blank_field() {
        return Err(OrdersServiceError::MissingField(field));
    }

    Ok(())
}

/// Total quantity per product, in order of first appearance.
fn requested_quantities(order: &NewOrder) -> Vec<(ProductUuid, u64)> {
    let mut positions: FxHashMap<ProductUuid, usize> = FxHashMap::default();
    let mut requested: Vec<(ProductUuid, u64)> = Vec::with_capacity(order.items.len());

    for item in &order.items {
        let quantity = u64::from(item.quantity);

        match positions.get(&item.product) {
            Some(&index) => requested[index].1 += quantity,
            None => {
                positions.insert(item.product, requested.len());
                requested.push((item.product, quantity));
            }
        }
    }

    requested
}

/// Check every requested product against its locked row.
fn check_availability(
    order: &NewOrder,
    requested: &[(ProductUuid, u64)],
    products: &FxHashMap<ProductUuid, ProductRecord>,
) -> Result<(), OrdersServiceError> {
    for &(uuid, quantity) in requested {
        let product = products
            .get(&uuid)
            .ok_or(OrdersServiceError::ProductNotFound(uuid))?;

        if product.store_uuid != order.store {
            return Err(OrdersServiceError::ProductFromOtherStore(uuid));
        }

        if !product.is_active {
            return Err(OrdersServiceError::ProductUnavailable(uuid));
        }

        if product.stock < quantity {
            return Err(OrdersServiceError::InsufficientStock {
                product: uuid,
                available: product.stock,
                requested: quantity,
            });
        }
    }

    Ok(())
}

/// Quantity to return per product, sorted by uuid so rows are locked in the
/// same order `create_order` locks them.
fn restock_quantities(items: &[OrderItemRecord]) -> Vec<(ProductUuid, u64)> {
    let mut totals: FxHashMap<ProductUuid, u64> = FxHashMap::default();

    for item in items {
        *totals.entry(item.product_uuid).or_default() += u64::from(item.quantity);
    }

    let mut restock: Vec<(ProductUuid, u64)> = totals.into_iter().collect();
    restock.sort_unstable_by_key(|(product, _)| *product);

    restock
}

fn attach_items(orders: &mut [OrderRecord], items: Vec<OrderItemRecord>) {
    let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

    for item in items {
        by_order.entry(item.order_uuid).or_default().push(item);
    }

    for order in orders {
        if let Some(items) = by_order.remove(&order.uuid) {
            order.items = items;
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        validate_new_order(&order)?;

        let requested = requested_quantities(&order);

        let mut lock_order: Vec<ProductUuid> = requested.iter().map(|(uuid, _)| *uuid).collect();
        lock_order.sort_unstable();

        let mut tx = self.db.begin_transaction().await?;

        match self.stores_repository.get_store(&mut tx, order.store).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::StoreNotFound),
            Err(error) => return Err(error.into()),
        }

        let products: FxHashMap<ProductUuid, ProductRecord> = self
            .products_repository
            .lock_products(&mut tx, &lock_order)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        if let Err(error) = check_availability(&order, &requested, &products) {
            warn!(store = %order.store, %error, "order rejected");

            return Err(error);
        }

        let mut lines = Vec::with_capacity(order.items.len());

        for item in &order.items {
            let product = products
                .get(&item.product)
                .ok_or(OrdersServiceError::ProductNotFound(item.product))?;

            lines.push((
                item,
                product.price,
                line_subtotal(product.price, item.quantity)?,
            ));
        }

        let totals = compute_totals(lines.iter().map(|line| line.2), &self.settings)?;

        let day = day_key(Timestamp::now());
        let sequence = self.sequences_repository.next_value(&mut tx, &day).await?;
        let order_number = format_order_number(&day, sequence);

        let mut created = self
            .orders_repository
            .create_order(&mut tx, &order, &order_number, totals)
            .await?;

        for (item, unit_price, subtotal) in lines {
            let item = self
                .items_repository
                .create_order_item(
                    &mut tx,
                    created.uuid,
                    item.product,
                    item.quantity,
                    unit_price,
                    subtotal,
                )
                .await?;

            created.items.push(item);
        }

        for &(product, quantity) in &requested {
            let remaining = self
                .products_repository
                .subtract_stock(&mut tx, product, quantity)
                .await?;

            if remaining.is_none() {
                return Err(OrdersServiceError::InsufficientStock {
                    product,
                    available: products.get(&product).map_or(0, |p| p.stock),
                    requested: quantity,
                });
            }
        }

        tx.commit().await?;

        info!(
            order = %created.uuid,
            order_number = %created.order_number,
            store = %created.store_uuid,
            total = created.total,
            "order created"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.orders_repository.get_order(&mut tx, order).await?;

        order.items = self
            .items_repository
            .get_order_items(&mut tx, &[order.uuid])
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        filter: OrderFilter,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, filter, page)
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self.items_repository.get_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if update.is_empty() {
            return Err(OrdersServiceError::EmptyUpdate);
        }

        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        let next = match update.status {
            Some(status) => Some(current.status.transition(status).inspect_err(|error| {
                warn!(order = %order, %error, "status transition rejected");
            })?),
            None => None,
        };

        let items = self
            .items_repository
            .get_order_items(&mut tx, &[order])
            .await?;

        if next == Some(OrderStatus::Cancelled) {
            for (product, quantity) in restock_quantities(&items) {
                self.products_repository
                    .add_stock(&mut tx, product, quantity)
                    .await?
                    .ok_or(OrdersServiceError::ProductNotFound(product))?;
            }
        }

        let paid_at = (update.is_paid == Some(true) && current.paid_at.is_none())
            .then(Timestamp::now);

        let mut updated = self
            .orders_repository
            .update_order(
                &mut tx,
                order,
                OrderChanges {
                    status: next,
                    notes: update.notes,
                    is_paid: update.is_paid,
                    paid_at,
                },
            )
            .await?;

        tx.commit().await?;

        updated.items = items;

        info!(
            order = %order,
            from = %current.status,
            to = %updated.status,
            is_paid = updated.is_paid,
            "order updated"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, price and persist an order, reserving its stock.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// List orders newest first.
    async fn list_orders(
        &self,
        filter: OrderFilter,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Apply a status transition and/or payment and notes change.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
