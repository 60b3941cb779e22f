//! # Controller Doc Export 模块
//!
//! 控制器文档的只读导出投影：
//! - [`sheet`]：xlsx 工作簿（单个控制器 / 分区批量，每个控制器一个工作表）
//! - [`document`]：分页 PDF（单个控制器 / 分区批量，每个控制器从新页开始）
//! - [`naming`]：导出文件命名
//! - [`file`]：导出结果与原子落盘
//!
//! 导出基于调用时读取的快照，失败时返回 [`ExportError`]，不产生文件内容。

pub mod document;
pub mod error;
pub mod file;
pub mod naming;
pub mod sheet;

pub use document::{DocumentOptions, DrawOp, Page, layout_controller_pages, layout_section_pages};
pub use error::ExportError;
pub use file::ExportFile;
pub use naming::{ExportFormat, controller_file_name, sanitize_component, section_file_name};
pub use sheet::{Cell, RowStyle, SheetRow, sheet_rows, unique_sheet_names};

use chrono::NaiveDate;
use domain::ControllerData;
use tracing::info;

const DOCUMENT_TITLE: &str = "Controller Documentation";

/// 导出单个控制器。
pub fn export_controller(
    controller: &ControllerData,
    format: ExportFormat,
    date: NaiveDate,
    options: DocumentOptions,
) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Xlsx => sheet::controller_workbook(controller)?,
        ExportFormat::Pdf => {
            let pages = layout_controller_pages(controller, options);
            document::render_pdf(DOCUMENT_TITLE, &pages)?
        }
    };
    let file_name = controller_file_name(controller, date, format);
    info!(
        controller_id = %controller.id,
        file_name = %file_name,
        size = bytes.len(),
        "controller exported"
    );
    Ok(ExportFile {
        file_name,
        format,
        bytes,
    })
}

/// 导出一个分区下的全部控制器。
pub fn export_section(
    section_name: &str,
    controllers: &[&ControllerData],
    format: ExportFormat,
    date: NaiveDate,
    options: DocumentOptions,
) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Xlsx => sheet::batch_workbook(controllers)?,
        ExportFormat::Pdf => {
            let pages = layout_section_pages(section_name, controllers, options)?;
            document::render_pdf(section_name, &pages)?
        }
    };
    let file_name = section_file_name(section_name, date, format);
    info!(
        section = section_name,
        controllers = controllers.len(),
        file_name = %file_name,
        "section exported"
    );
    Ok(ExportFile {
        file_name,
        format,
        bytes,
    })
}
