//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    domain::{
        amounts::{to_sql_amount, try_get_amount},
        orders::{
            data::{CustomerDetails, NewOrder, OrderFilter, ShippingAddress},
            records::{OrderRecord, OrderUuid},
            status::OrderStatus,
            totals::OrderTotals,
        },
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
    pagination::Page,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const UPDATE_ORDER_SQL: &str = include_str!("../sql/update_order.sql");

/// Column changes applied by [`PgOrdersRepository::update_order`].
#[derive(Debug, Clone, Default)]
pub(crate) struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
    pub is_paid: Option<bool>,

    /// Applied only when the order has no `paid_at` yet.
    pub paid_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
        order_number: &str,
        totals: OrderTotals,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order_number)
            .bind(order.store.into_uuid())
            .bind(order.placed_by.map(UserUuid::into_uuid))
            .bind(order.customer.name.trim())
            .bind(order.customer.email.trim())
            .bind(order.customer.phone.as_deref())
            .bind(order.shipping_address.street.trim())
            .bind(order.shipping_address.city.trim())
            .bind(order.shipping_address.state.trim())
            .bind(order.shipping_address.postal_code.trim())
            .bind(order.shipping_address.country.trim())
            .bind(order.notes.as_deref())
            .bind(to_sql_amount(totals.subtotal)?)
            .bind(to_sql_amount(totals.tax)?)
            .bind(to_sql_amount(totals.shipping_cost)?)
            .bind(to_sql_amount(totals.total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch and row-lock an order until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: OrderFilter,
        page: Page,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.placed_by.map(UserUuid::into_uuid))
            .bind(filter.store.map(StoreUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        changes: OrderChanges,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(changes.status.map(OrderStatus::as_str))
            .bind(changes.notes)
            .bind(changes.is_paid)
            .bind(changes.paid_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            store_uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            placed_by: row
                .try_get::<Option<uuid::Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            customer: CustomerDetails {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            shipping_address: ShippingAddress {
                street: row.try_get("shipping_street")?,
                city: row.try_get("shipping_city")?,
                state: row.try_get("shipping_state")?,
                postal_code: row.try_get("shipping_postal_code")?,
                country: row.try_get("shipping_country")?,
            },
            notes: row.try_get("notes")?,
            subtotal: try_get_amount(row, "subtotal")?,
            tax: try_get_amount(row, "tax")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            total: try_get_amount(row, "total")?,
            status,
            is_paid: row.try_get("is_paid")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
            items: Vec::new(),
        })
    }
}
