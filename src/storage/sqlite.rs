//! SQLite implementation of the key-value store.

use async_trait::async_trait;
use sea_query::{Expr, OnConflict, Query, SqliteQueryBuilder};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::interfaces::kv_store::{KeyValueStore, Result, WriteOp};

use super::schema::{Records, CREATE_RECORDS_TABLE};

/// SQLite implementation of KeyValueStore.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_RECORDS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn upsert_sql(key: &str, value: &str) -> String {
        let updated_at = chrono::Utc::now().to_rfc3339();
        Query::insert()
            .into_table(Records::Table)
            .columns([Records::Key, Records::Value, Records::UpdatedAt])
            .values_panic([key.into(), value.into(), updated_at.into()])
            .on_conflict(
                OnConflict::column(Records::Key)
                    .update_columns([Records::Value, Records::UpdatedAt])
                    .to_owned(),
            )
            .to_string(SqliteQueryBuilder)
    }

    fn delete_sql(key: &str) -> String {
        Query::delete()
            .from_table(Records::Table)
            .and_where(Expr::col(Records::Key).eq(key))
            .to_string(SqliteQueryBuilder)
    }

    async fn apply(tx: &mut Transaction<'_, Sqlite>, op: &WriteOp) -> Result<()> {
        let sql = match op {
            WriteOp::Put { key, value } => Self::upsert_sql(key, value),
            WriteOp::Delete { key } => Self::delete_sql(key),
        };
        sqlx::query(&sql).execute(&mut **tx).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let query = Query::select()
            .column(Records::Value)
            .from(Records::Table)
            .and_where(Expr::col(Records::Key).eq(key))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        Ok(row.map(|row| row.get("value")))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        sqlx::query(&Self::upsert_sql(key, &value))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query(&Self::delete_sql(key))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn write_batch(&self, ops: Vec<WriteOp>) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }

        // Dropping the transaction on error rolls it back
        let mut tx = self.pool.begin().await?;
        for op in &ops {
            Self::apply(&mut tx, op).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
