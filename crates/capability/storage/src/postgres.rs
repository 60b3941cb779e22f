//! Postgres 键值存储实现
//!
//! 使用单表 `ctrldoc_blobs(key, value, updated_at)`，写入为按主键 upsert。
//!
//! 设计要点：
//! - 连接时自动建表
//! - 使用参数化 SQL 防止注入

use crate::error::StorageError;
use crate::traits::BlobStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

// 每次变更只写一行，连接数上限保持较小
const MAX_CONNECTIONS: u32 = 4;

pub struct PgBlobStore {
    pub pool: PgPool,
}

impl PgBlobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 通过数据库 URL 建立连接池并确保表存在
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            "create table if not exists ctrldoc_blobs (\
             key text primary key, \
             value text not null, \
             updated_at timestamptz not null default now())",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BlobStore for PgBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("select value from ctrldoc_blobs where key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(row.try_get("value")?))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            "insert into ctrldoc_blobs (key, value, updated_at) values ($1, $2, now()) \
             on conflict (key) do update set value = excluded.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from ctrldoc_blobs where key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
