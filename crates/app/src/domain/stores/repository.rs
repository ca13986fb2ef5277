//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        stores::{
            data::{NewStore, StoreUpdate},
            records::{StoreRecord, StoreUuid},
        },
        users::records::UserUuid,
    },
    pagination::Page,
};

const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const LIST_STORES_SQL: &str = include_str!("sql/list_stores.sql");
const UPDATE_STORE_SQL: &str = include_str!("sql/update_store.sql");
const DELETE_STORE_SQL: &str = include_str!("sql/delete_store.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(store.name)
            .bind(store.description)
            .bind(store.address)
            .bind(store.phone)
            .bind(store.email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: Option<UserUuid>,
        page: Page,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(LIST_STORES_SQL)
            .bind(member.map(UserUuid::into_uuid))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(UPDATE_STORE_SQL)
            .bind(store.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.address)
            .bind(update.phone)
            .bind(update.email)
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STORE_SQL)
            .bind(store.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
