//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：bad_request_error, not_found_error, storage_error, save_error, domain_error, export_error
//! - 成功响应：ok, file_response
//! - DTO 转换：controller_to_dto, controller_summary_to_dto, template_to_dto, fixture_to_dto
//!
//! 错误码对应：
//! - 校验失败 / 编辑失败 → 400 INVALID.REQUEST
//! - 资源不存在 / 空分区导出 → 404 RESOURCE.NOT_FOUND
//! - 存储后端失败 → 500 INTERNAL.ERROR
//! - 导出编码失败 → 500 EXPORT.FAILED

use api_contract::{
    ApiResponse, ChannelDto, ChannelShapeDto, ControllerDto, ControllerSummaryDto, FixtureDto,
    PowerDto, TemplateDto,
};
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use ctrldoc_export::{ExportError, ExportFile};
use ctrldoc_storage::StorageError;
use ctrldoc_telemetry::{record_export_failure, record_save_failure, record_validation_rejection};
use domain::{
    Channel, ChannelShape, ControllerData, ControllerTemplate, DomainError, FixtureConfig,
    PowerSummary,
};
use serde::Serialize;
use tracing::warn;

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 存储错误响应：校验失败为 400，其余为 500
pub fn storage_error(err: StorageError) -> Response {
    if err.is_validation() {
        record_validation_rejection();
        return bad_request_error(err.message());
    }
    warn!(error = %err, "storage backend failed");
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 保存失败响应：额外记录后端失败次数
pub fn save_error(err: StorageError) -> Response {
    if !err.is_validation() {
        record_save_failure();
    }
    storage_error(err)
}

/// 草稿编辑错误响应
pub fn domain_error(err: DomainError) -> Response {
    bad_request_error(err.to_string())
}

/// 导出错误响应：空分区为 404，其余为 500
pub fn export_error(err: ExportError) -> Response {
    record_export_failure();
    if matches!(err, ExportError::EmptyBatch) {
        return not_found_error();
    }
    warn!(error = %err, "export failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("EXPORT.FAILED", err.to_string())),
    )
        .into_response()
}

/// 文件下载响应
pub fn file_response(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// PowerSummary 转 PowerDto
pub fn power_to_dto(summary: PowerSummary) -> PowerDto {
    PowerDto {
        total_watts: summary.total_watts,
        limit_watts: summary.limit_watts,
        load_percent: summary.load_percent,
        level: summary.level.as_str().to_string(),
    }
}

/// Channel 转 ChannelDto
pub fn channel_to_dto(channel: &Channel) -> ChannelDto {
    ChannelDto {
        id: channel.id.clone(),
        channel_number: channel.channel_number,
        fixture_type: channel.fixture_type.clone(),
        voltage: channel.voltage.clone(),
        current: channel.current.clone(),
        parallel_count: channel.parallel_count,
        power_watts: channel.power(),
    }
}

/// ControllerData 转 ControllerDto
pub fn controller_to_dto(controller: ControllerData) -> ControllerDto {
    let power = power_to_dto(controller.power_summary());
    ControllerDto {
        channels: controller.channels.iter().map(channel_to_dto).collect(),
        id: controller.id,
        campus: controller.campus,
        building: controller.building,
        floor: controller.floor,
        zone: controller.zone,
        controller_number: controller.controller_number,
        power_limit: controller.power_limit,
        power,
        created_at: timestamp(controller.created_at),
        updated_at: timestamp(controller.updated_at),
    }
}

/// 仪表盘中的控制器摘要
pub fn controller_summary_to_dto(controller: &ControllerData) -> ControllerSummaryDto {
    ControllerSummaryDto {
        id: controller.id.clone(),
        zone: controller.zone.clone(),
        controller_number: controller.controller_number.clone(),
        channel_count: controller.channels.len(),
        power: power_to_dto(controller.power_summary()),
        updated_at: timestamp(controller.updated_at),
    }
}

fn shape_to_dto(shape: &ChannelShape) -> ChannelShapeDto {
    ChannelShapeDto {
        channel_number: shape.channel_number,
        fixture_type: shape.fixture_type.clone(),
        voltage: shape.voltage.clone(),
        current: shape.current.clone(),
        parallel_count: shape.parallel_count,
    }
}

/// ControllerTemplate 转 TemplateDto
pub fn template_to_dto(template: ControllerTemplate) -> TemplateDto {
    TemplateDto {
        channels: template.channels.iter().map(shape_to_dto).collect(),
        id: template.id,
        name: template.name,
        description: template.description,
        campus: template.campus,
        building: template.building,
        floor: template.floor,
        zone: template.zone,
        controller_number: template.controller_number,
        power_limit: template.power_limit,
        created_at: timestamp(template.created_at),
    }
}

/// FixtureConfig 转 FixtureDto
pub fn fixture_to_dto(fixture: FixtureConfig) -> FixtureDto {
    FixtureDto {
        power_watts: fixture.power(),
        id: fixture.id,
        name: fixture.name,
        voltage: fixture.voltage,
        current: fixture.current,
        created_at: timestamp(fixture.created_at),
    }
}
