//! 导出错误类型。

/// 导出失败：不产生任何文件内容。
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export")]
    EmptyBatch,
    #[error("xlsx encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("pdf encoding failed: {0}")]
    Pdf(String),
    #[error("write export file: {0}")]
    Io(#[from] std::io::Error),
}
