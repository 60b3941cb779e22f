//! 导出 handlers
//!
//! - GET /controllers/{id}/export/xlsx - 单个控制器 xlsx
//! - GET /controllers/{id}/export/pdf - 单个控制器 PDF
//! - GET /exports/xlsx?campus=&building=&floor= - 分区批量 xlsx
//! - GET /exports/pdf?campus=&building=&floor= - 分区批量 PDF
//!
//! 导出基于调用时读取的快照；配置了导出目录时同时落盘一份。
//! 分区内没有控制器时返回 404。

use crate::AppState;
use crate::handlers::controllers::{ControllerPath, load_controller};
use crate::utils::{export_error, file_response, storage_error};
use api_contract::SectionQuery;
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use chrono::Utc;
use ctrldoc_export::{ExportError, ExportFile, ExportFormat, export_controller, export_section};
use ctrldoc_telemetry::record_export_generated;
use domain::{group_by_location, section_name};
use tracing::info;

async fn deliver(state: &AppState, result: Result<ExportFile, ExportError>) -> Response {
    let file = match result {
        Ok(file) => file,
        Err(err) => return export_error(err),
    };
    if let Some(dir) = &state.export_dir {
        match file.write_to_dir(dir).await {
            Ok(path) => info!(path = %path.display(), "export archived"),
            Err(err) => return export_error(err),
        }
    }
    record_export_generated();
    file_response(file)
}

async fn controller_export(state: AppState, id: &str, format: ExportFormat) -> Response {
    let controller = match load_controller(&state, id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    let result = export_controller(
        &controller,
        format,
        Utc::now().date_naive(),
        state.document_options,
    );
    deliver(&state, result).await
}

async fn section_export(state: AppState, query: SectionQuery, format: ExportFormat) -> Response {
    let controllers = match state.records.list_controllers().await {
        Ok(controllers) => controllers,
        Err(err) => return storage_error(err),
    };
    let hierarchy = group_by_location(&controllers);
    let building = query.building.as_deref();
    // 楼层只在指定楼宇时生效
    let floor = building.and(query.floor.as_deref());
    let members = hierarchy.section(&query.campus, building, floor);
    let name = section_name(&query.campus, building, floor);
    let result = export_section(
        &name,
        &members,
        format,
        Utc::now().date_naive(),
        state.document_options,
    );
    deliver(&state, result).await
}

pub async fn export_controller_xlsx(
    State(state): State<AppState>,
    Path(path): Path<ControllerPath>,
) -> Response {
    controller_export(state, &path.controller_id, ExportFormat::Xlsx).await
}

pub async fn export_controller_pdf(
    State(state): State<AppState>,
    Path(path): Path<ControllerPath>,
) -> Response {
    controller_export(state, &path.controller_id, ExportFormat::Pdf).await
}

pub async fn export_section_xlsx(
    State(state): State<AppState>,
    Query(query): Query<SectionQuery>,
) -> Response {
    section_export(state, query, ExportFormat::Xlsx).await
}

pub async fn export_section_pdf(
    State(state): State<AppState>,
    Query(query): Query<SectionQuery>,
) -> Response {
    section_export(state, query, ExportFormat::Pdf).await
}
