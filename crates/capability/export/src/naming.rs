//! 导出文件命名
//!
//! - 单个控制器：`Controller_<编号|Doc>_<楼宇>_<YYYY-MM-DD>.<ext>`
//! - 批量导出：`<分区名>_<YYYY-MM-DD>.<ext>`
//!
//! 名称中的路径分隔符、空白等字符替换为 `_`。

use chrono::NaiveDate;
use domain::ControllerData;

/// 导出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// 文件名片段清理：保留字母、数字、`-` 与 `.`，其余替换为 `_` 并合并。
pub fn sanitize_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        let keep = ch.is_alphanumeric() || ch == '-' || ch == '.';
        if keep {
            out.push(ch);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// 单个控制器的导出文件名。
pub fn controller_file_name(
    controller: &ControllerData,
    date: NaiveDate,
    format: ExportFormat,
) -> String {
    let number = sanitize_component(&controller.controller_number);
    let number = if number.is_empty() { "Doc".to_string() } else { number };
    format!(
        "Controller_{}_{}_{}.{}",
        number,
        sanitize_component(&controller.building),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// 批量导出的文件名。
pub fn section_file_name(section_name: &str, date: NaiveDate, format: ExportFormat) -> String {
    let section = sanitize_component(section_name);
    let section = if section.is_empty() { "Controllers".to_string() } else { section };
    format!(
        "{}_{}.{}",
        section,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
