//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    access::Role,
    domain::users::{
        data::{NewUser, UserUpdate},
        records::{UserRecord, UserUuid},
    },
    pagination::Page,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.email.trim().to_lowercase())
            .bind(user.full_name)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(update.email.map(|email| email.trim().to_lowercase()))
            .bind(update.full_name)
            .bind(update.role.map(Role::as_str))
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            role,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
