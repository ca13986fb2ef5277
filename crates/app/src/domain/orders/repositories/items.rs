//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    amounts::{to_sql_amount, try_get_amount},
    orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    products::records::ProductUuid,
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u32,
        unit_price: u64,
        subtotal: u64,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(i64::from(quantity))
            .bind(to_sql_amount(unit_price)?)
            .bind(to_sql_amount(subtotal)?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Items of every order in `orders`, oldest first.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
