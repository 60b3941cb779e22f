//! 记录仓库
//!
//! 在 BlobStore 之上维护三个互相独立的集合，每个集合是一个 JSON 数组：
//! - `controller_docs`：控制器文档
//! - `controller_templates`：控制器模板
//! - `fixture_configs`：灯具预设
//!
//! 每次变更都整表读出、修改、整表写回；集合之间没有事务和外键约束。
//! 同一个 RecordStore 内的写操作串行执行，跨进程时最后写入者生效。

use crate::error::StorageError;
use crate::traits::BlobStore;
use crate::validation::{ensure_valid_controller, ensure_valid_fixture, ensure_valid_template};
use crate::in_memory::InMemoryBlobStore;
use chrono::Utc;
use domain::{ControllerData, ControllerTemplate, FixtureConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const CONTROLLERS_KEY: &str = "controller_docs";
pub const TEMPLATES_KEY: &str = "controller_templates";
pub const FIXTURES_KEY: &str = "fixture_configs";

/// 集合中的记录：按 ID 识别。
trait Keyed: Serialize + DeserializeOwned + Send + Sync {
    fn record_id(&self) -> &str;
}

impl Keyed for ControllerData {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Keyed for ControllerTemplate {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Keyed for FixtureConfig {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// 记录仓库
pub struct RecordStore {
    blobs: Arc<dyn BlobStore>,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            write_lock: Mutex::new(()),
        }
    }

    /// 基于内存键值存储的仓库
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBlobStore::new()))
    }

    // ------------------------------------------------------------------
    // 控制器
    // ------------------------------------------------------------------

    /// 保存控制器：存在同 ID 记录时替换并刷新 updatedAt，否则追加
    pub async fn save_controller(
        &self,
        controller: ControllerData,
    ) -> Result<ControllerData, StorageError> {
        ensure_valid_controller(&controller)?;
        self.upsert(CONTROLLERS_KEY, controller, |previous, next| {
            next.updated_at = Utc::now().max(previous.updated_at);
        })
        .await
    }

    /// 控制器列表（按保存顺序）
    pub async fn list_controllers(&self) -> Result<Vec<ControllerData>, StorageError> {
        self.load(CONTROLLERS_KEY).await
    }

    pub async fn find_controller(&self, id: &str) -> Result<Option<ControllerData>, StorageError> {
        self.find(CONTROLLERS_KEY, id).await
    }

    pub async fn delete_controller(&self, id: &str) -> Result<bool, StorageError> {
        let removed = self
            .retain::<ControllerData>(CONTROLLERS_KEY, |item| item.id != id)
            .await?;
        Ok(removed > 0)
    }

    /// 删除某园区下的全部控制器，返回删除数量
    pub async fn delete_by_campus(&self, campus: &str) -> Result<usize, StorageError> {
        self.retain::<ControllerData>(CONTROLLERS_KEY, |item| item.campus != campus)
            .await
    }

    /// 删除某楼宇下的全部控制器，返回删除数量
    pub async fn delete_by_building(
        &self,
        campus: &str,
        building: &str,
    ) -> Result<usize, StorageError> {
        self.retain::<ControllerData>(CONTROLLERS_KEY, |item| {
            !(item.campus == campus && item.building == building)
        })
        .await
    }

    /// 删除某楼层下的全部控制器，返回删除数量
    pub async fn delete_by_floor(
        &self,
        campus: &str,
        building: &str,
        floor: &str,
    ) -> Result<usize, StorageError> {
        self.retain::<ControllerData>(CONTROLLERS_KEY, |item| {
            !(item.campus == campus && item.building == building && item.floor == floor)
        })
        .await
    }

    // ------------------------------------------------------------------
    // 模板
    // ------------------------------------------------------------------

    pub async fn save_template(
        &self,
        template: ControllerTemplate,
    ) -> Result<ControllerTemplate, StorageError> {
        ensure_valid_template(&template)?;
        self.upsert(TEMPLATES_KEY, template, |_, _| {}).await
    }

    pub async fn list_templates(&self) -> Result<Vec<ControllerTemplate>, StorageError> {
        self.load(TEMPLATES_KEY).await
    }

    pub async fn find_template(
        &self,
        id: &str,
    ) -> Result<Option<ControllerTemplate>, StorageError> {
        self.find(TEMPLATES_KEY, id).await
    }

    pub async fn delete_template(&self, id: &str) -> Result<bool, StorageError> {
        let removed = self
            .retain::<ControllerTemplate>(TEMPLATES_KEY, |item| item.id != id)
            .await?;
        Ok(removed > 0)
    }

    // ------------------------------------------------------------------
    // 灯具预设
    // ------------------------------------------------------------------

    pub async fn save_fixture(&self, fixture: FixtureConfig) -> Result<FixtureConfig, StorageError> {
        ensure_valid_fixture(&fixture)?;
        self.upsert(FIXTURES_KEY, fixture, |_, _| {}).await
    }

    pub async fn list_fixtures(&self) -> Result<Vec<FixtureConfig>, StorageError> {
        self.load(FIXTURES_KEY).await
    }

    pub async fn find_fixture(&self, id: &str) -> Result<Option<FixtureConfig>, StorageError> {
        self.find(FIXTURES_KEY, id).await
    }

    pub async fn delete_fixture(&self, id: &str) -> Result<bool, StorageError> {
        let removed = self
            .retain::<FixtureConfig>(FIXTURES_KEY, |item| item.id != id)
            .await?;
        Ok(removed > 0)
    }

    // ------------------------------------------------------------------
    // 整表读写
    // ------------------------------------------------------------------

    async fn load<T: Keyed>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let Some(data) = self.blobs.get(key).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&data)
            .map_err(|err| StorageError::new(format!("decode {key}: {err}")))
    }

    async fn persist<T: Keyed>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let data = serde_json::to_string(records)?;
        self.blobs.put(key, &data).await
    }

    async fn find<T: Keyed>(&self, key: &str, id: &str) -> Result<Option<T>, StorageError> {
        let records: Vec<T> = self.load(key).await?;
        Ok(records.into_iter().find(|item| item.record_id() == id))
    }

    async fn upsert<T, F>(&self, key: &str, mut record: T, on_replace: F) -> Result<T, StorageError>
    where
        T: Keyed + Clone,
        F: FnOnce(&T, &mut T) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<T> = self.load(key).await?;
        match records
            .iter()
            .position(|item| item.record_id() == record.record_id())
        {
            Some(idx) => {
                on_replace(&records[idx], &mut record);
                records[idx] = record.clone();
                debug!(key, id = record.record_id(), "record replaced");
            }
            None => {
                records.push(record.clone());
                debug!(key, id = record.record_id(), "record appended");
            }
        }
        self.persist(key, &records).await?;
        info!(key, id = record.record_id(), total = records.len(), "record saved");
        Ok(record)
    }

    async fn retain<T>(
        &self,
        key: &str,
        keep: impl Fn(&T) -> bool + Send,
    ) -> Result<usize, StorageError>
    where
        T: Keyed,
    {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<T> = self.load(key).await?;
        let before = records.len();
        records.retain(|item| keep(item));
        let removed = before - records.len();
        if removed > 0 {
            self.persist(key, &records).await?;
            info!(key, removed, remaining = records.len(), "records deleted");
        }
        Ok(removed)
    }
}
