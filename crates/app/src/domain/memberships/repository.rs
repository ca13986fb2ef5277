//! Memberships Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    access::StoreRole,
    domain::{
        memberships::{
            data::NewMembership,
            records::{MembershipRecord, MembershipUuid},
        },
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
};

const CREATE_MEMBERSHIP_SQL: &str = include_str!("sql/create_membership.sql");
const LIST_MEMBERSHIPS_SQL: &str = include_str!("sql/list_memberships.sql");
const FIND_STORE_ROLE_SQL: &str = include_str!("sql/find_store_role.sql");
const UPDATE_MEMBERSHIP_ROLE_SQL: &str = include_str!("sql/update_membership_role.sql");
const DELETE_MEMBERSHIP_SQL: &str = include_str!("sql/delete_membership.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMembershipsRepository;

impl PgMembershipsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_membership(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        membership: NewMembership,
    ) -> Result<MembershipRecord, sqlx::Error> {
        query_as::<Postgres, MembershipRecord>(CREATE_MEMBERSHIP_SQL)
            .bind(membership.uuid.into_uuid())
            .bind(membership.user.into_uuid())
            .bind(store.into_uuid())
            .bind(membership.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_memberships(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<MembershipRecord>, sqlx::Error> {
        query_as::<Postgres, MembershipRecord>(LIST_MEMBERSHIPS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_store_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        store: StoreUuid,
    ) -> Result<Option<StoreRole>, sqlx::Error> {
        let role: Option<String> = query_scalar(FIND_STORE_ROLE_SQL)
            .bind(user.into_uuid())
            .bind(store.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        role.map(|role| decode_store_role(&role)).transpose()
    }

    pub(crate) async fn update_membership_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        user: UserUuid,
        role: StoreRole,
    ) -> Result<MembershipRecord, sqlx::Error> {
        query_as::<Postgres, MembershipRecord>(UPDATE_MEMBERSHIP_ROLE_SQL)
            .bind(store.into_uuid())
            .bind(user.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_membership(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MEMBERSHIP_SQL)
            .bind(store.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn decode_store_role(role: &str) -> Result<StoreRole, sqlx::Error> {
    role.parse::<StoreRole>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for MembershipRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: MembershipUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            store_uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            role: decode_store_role(&role)?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
