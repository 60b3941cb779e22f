//! 存储接口 Trait 定义
//!
//! BlobStore：按键整体读写字符串的键值存储。
//! 记录仓库（RecordStore）在其上按集合整表读写 JSON 数组。
//!
//! 设计原则：
//! - 单次 put 要么完整写入，要么保持原值
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use async_trait::async_trait;

/// 键值存储接口
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 读取键对应的值，不存在时返回 None
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 整体覆盖写入
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除键，返回键是否存在
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
