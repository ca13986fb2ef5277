//! Order Number Sequences Repository

use sqlx::{Postgres, Transaction, query_scalar};

const NEXT_ORDER_SEQUENCE_SQL: &str = include_str!("../sql/next_order_sequence.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderSequencesRepository;

impl PgOrderSequencesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Claim the next sequence value for `day`.
    ///
    /// The upsert holds the day's row lock until the transaction ends, so
    /// concurrent creators are serialised and never observe the same value.
    pub(crate) async fn next_value(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        day: &str,
    ) -> Result<u64, sqlx::Error> {
        let value: i64 = query_scalar(NEXT_ORDER_SEQUENCE_SQL)
            .bind(day)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
            index: "last_value".to_string(),
            source: Box::new(e),
        })
    }
}
