//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    domain::{
        amounts::{to_sql_amount, try_get_amount},
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
        stores::records::StoreUuid,
    },
    pagination::Page,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SUBTRACT_STOCK_SQL: &str = include_str!("sql/subtract_stock.sql");
const ADD_STOCK_SQL: &str = include_str!("sql/add_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.store.map(StoreUuid::into_uuid))
            .bind(filter.include_inactive)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock live product rows for the rest of the transaction.
    ///
    /// Rows are locked in uuid order so concurrent callers acquire them in the
    /// same sequence. Missing or deleted products are simply absent.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, ProductRecord>(LOCK_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.store_uuid.into_uuid())
            .bind(product.name)
            .bind(product.description)
            .bind(product.sku)
            .bind(to_sql_amount(product.price)?)
            .bind(to_sql_amount(product.stock)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price = update.price.map(to_sql_amount).transpose()?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.sku)
            .bind(price)
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Decrement stock if at least `quantity` is available.
    ///
    /// Returns the new stock level, or `None` when the product is missing or
    /// holds less than `quantity`.
    pub(crate) async fn subtract_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let stock: Option<i64> = query_scalar(SUBTRACT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_sql_amount(quantity)?)
            .fetch_optional(&mut **tx)
            .await?;

        stock.map(decode_stock).transpose()
    }

    /// Increment stock. Returns `None` when the product does not exist.
    pub(crate) async fn add_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let stock: Option<i64> = query_scalar(ADD_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_sql_amount(quantity)?)
            .fetch_optional(&mut **tx)
            .await?;

        stock.map(decode_stock).transpose()
    }
}

fn decode_stock(stock: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
        index: "stock".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            store_uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            sku: row.try_get("sku")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_amount(row, "stock")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
