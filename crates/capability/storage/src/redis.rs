//! Redis 键值存储实现
//!
//! 每个集合保存为一个字符串键：`<prefix>:<key>`。

use crate::error::StorageError;
use crate::traits::BlobStore;
use redis::AsyncCommands;

/// Redis 键值存储
pub struct RedisBlobStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisBlobStore {
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn connect(redis_url: &str, key_prefix: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self::new(client, key_prefix))
    }

    fn full_key(&self, key: &str) -> String {
        let prefix = self.key_prefix.trim_end_matches(':');
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}:{key}")
        }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StorageError> {
        let connection = self.client.get_multiplexed_tokio_connection().await?;
        Ok(connection)
    }
}

#[async_trait::async_trait]
impl BlobStore for RedisBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut connection = self.connection().await?;
        let data: Option<String> = connection.get(self.full_key(key)).await?;
        Ok(data)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut connection = self.connection().await?;
        connection
            .set::<_, _, ()>(self.full_key(key), value)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut connection = self.connection().await?;
        let removed: i64 = connection.del(self.full_key(key)).await?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::RedisBlobStore;

    #[test]
    fn full_key_applies_prefix() {
        let store = RedisBlobStore::connect("redis://127.0.0.1:6379", "ctrldoc:").expect("client");
        assert_eq!(store.full_key("controller_docs"), "ctrldoc:controller_docs");

        let bare = RedisBlobStore::connect("redis://127.0.0.1:6379", "").expect("client");
        assert_eq!(bare.full_key("fixture_configs"), "fixture_configs");
    }
}
