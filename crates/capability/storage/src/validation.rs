//! 验证辅助函数
//!
//! 保存前的统一校验，失败时返回 Validation 类错误且不写入：
//! - ensure_record_id：记录 ID 非空
//! - ensure_valid_controller：园区、楼宇、控制器编号必填，至少一个通道
//! - ensure_valid_template：模板名称必填
//! - ensure_valid_fixture：灯具名称、电压、电流必填
//! - ensure_storage_key：键名只允许字母、数字、`_` 与 `-`

use crate::error::StorageError;
use domain::{ControllerData, ControllerTemplate, FixtureConfig};

/// 验证记录 ID 非空
pub fn ensure_record_id(id: &str) -> Result<(), StorageError> {
    if id.trim().is_empty() {
        return Err(StorageError::validation("id required"));
    }
    Ok(())
}

pub fn ensure_valid_controller(controller: &ControllerData) -> Result<(), StorageError> {
    ensure_record_id(&controller.id)?;
    domain::validate_controller(controller)?;
    Ok(())
}

pub fn ensure_valid_template(template: &ControllerTemplate) -> Result<(), StorageError> {
    ensure_record_id(&template.id)?;
    domain::validate_template(template)?;
    Ok(())
}

pub fn ensure_valid_fixture(fixture: &FixtureConfig) -> Result<(), StorageError> {
    ensure_record_id(&fixture.id)?;
    domain::validate_fixture(fixture)?;
    Ok(())
}

/// 验证存储键名（文件后端会把键名用作文件名）
pub fn ensure_storage_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if !valid {
        return Err(StorageError::new(format!("invalid storage key: {key:?}")));
    }
    Ok(())
}
