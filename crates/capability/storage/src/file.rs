//! 文件键值存储实现
//!
//! 每个键对应数据目录下的 `<key>.json` 文件。
//!
//! 写入流程：
//! 1. 写入同目录下的临时文件
//! 2. rename 覆盖目标文件
//!
//! 写入失败时目标文件保持原值，临时文件被清理。

use crate::error::StorageError;
use crate::traits::BlobStore;
use crate::validation::ensure_storage_key;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 文件键值存储
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// 打开数据目录（不存在时创建）
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|err| {
            StorageError::new(format!("create data dir {}: {err}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        ensure_storage_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.blob_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::new(format!("read {}: {err}", path.display()))),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.blob_path(key)?;
        let tmp = self
            .dir
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));
        let written = match tokio::fs::write(&tmp, value).await {
            Ok(()) => tokio::fs::rename(&tmp, &path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::new(format!("write {}: {err}", path.display())));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.blob_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StorageError::new(format!("remove {}: {err}", path.display()))),
        }
    }
}
