use async_trait::async_trait;
use sqlx::{Executor, Postgres};

use super::PgStore;
use crate::error::StoreError;
use crate::repository::SequenceGenerator;

pub(super) async fn next_value<'e, E>(executor: E, counter: &str) -> Result<i64, StoreError>
where
    E: Executor<'e, Database = Postgres>,
{
    let value: i64 = sqlx::query_scalar(
        r#"INSERT INTO counters (name, sequence) VALUES ($1, 1)
           ON CONFLICT (name) DO UPDATE SET sequence = counters.sequence + 1
           RETURNING sequence"#,
    )
    .bind(counter)
    .fetch_one(executor)
    .await?;
    Ok(value)
}

#[async_trait]
impl SequenceGenerator for PgStore {
    async fn next_value(&self, counter: &str) -> Result<i64, StoreError> {
        next_value(&self.pool, counter).await
    }
}
