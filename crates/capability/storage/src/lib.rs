//! # Controller Doc Storage 模块
//!
//! 本模块提供控制器文档、模板与灯具预设的持久化，底层是一个可替换的键值存储。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`BlobStore`，按键读写整段 JSON 文本
//! 2. **记录仓库** (`records.rs`)：`RecordStore`，在键值存储之上维护三个记录集合
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型（Validation / Backend）
//! 4. **验证辅助层** (`validation.rs`)：保存前校验与键名校验
//! 5. **实现层**：
//!    - `in_memory`：内存实现（测试与演示）
//!    - `file`：数据目录下每键一个 JSON 文件，临时文件 + rename 写入
//!    - `redis`：Redis 字符串键，带前缀
//!    - `postgres`：单表 `ctrldoc_blobs(key, value)`，连接时建表
//!
//! ## 存储键
//!
//! - `controller_docs`：控制器文档数组
//! - `controller_templates`：模板数组
//! - `fixture_configs`：灯具预设数组
//!
//! JSON 字段使用 camelCase，与历史数据兼容。
//!
//! ## 一致性
//!
//! - 每次变更都是整表读出、修改、整表写回
//! - 同一个 `RecordStore` 的写操作由异步互斥锁串行化
//! - 校验失败时不发生写入；后端写入失败时原数据保持不变
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use ctrldoc_storage::{FileBlobStore, RecordStore};
//! use domain::ControllerData;
//! use std::sync::Arc;
//!
//! let blobs = FileBlobStore::open("./data").await?;
//! let records = RecordStore::new(Arc::new(blobs));
//!
//! let mut draft = ControllerData::new_draft();
//! draft.campus = "North".to_string();
//! draft.building = "B1".to_string();
//! draft.controller_number = "C-01".to_string();
//! records.save_controller(draft).await?;
//! ```

pub mod error;
pub mod file;
pub mod in_memory;
pub mod postgres;
pub mod records;
pub mod redis;
pub mod traits;
pub mod validation;

pub use error::*;
pub use file::FileBlobStore;
pub use in_memory::InMemoryBlobStore;
pub use postgres::PgBlobStore;
pub use records::{CONTROLLERS_KEY, FIXTURES_KEY, RecordStore, TEMPLATES_KEY};
pub use crate::redis::RedisBlobStore;
pub use traits::*;
pub use validation::*;
