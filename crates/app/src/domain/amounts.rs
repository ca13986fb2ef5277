//! Minor-unit amount conversions between domain `u64`s and `BIGINT` columns.

use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn to_sql_amount(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
