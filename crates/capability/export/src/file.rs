//! 导出文件与落盘
//!
//! 写入目录时先写同目录下的临时文件，再 rename 到目标文件名；
//! 失败时清理临时文件，不留下不完整的导出。

use crate::error::ExportError;
use crate::naming::ExportFormat;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一次导出的结果。
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// 写入目录，返回目标文件路径。
    pub async fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).await?;
        let target = dir.join(&self.file_name);
        let tmp = dir.join(format!(
            ".{}.{}.tmp",
            self.file_name,
            uuid::Uuid::new_v4().simple()
        ));
        if let Err(err) = fs::write(&tmp, &self.bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        Ok(target)
    }
}
