//! 内存键值存储实现
//!
//! 用于测试、演示和 `CTRLDOC_STORAGE=memory` 运行模式，进程退出即丢失。

use crate::error::StorageError;
use crate::traits::BlobStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// 内存键值存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置若干键值（测试用）
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = blobs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            blobs: RwLock::new(map),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .blobs
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .blobs
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut map = self
            .blobs
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.remove(key).is_some())
    }
}
