//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

fn default_parallel_count() -> u32 {
    1
}

// ============================================================================
// 控制器
// ============================================================================

/// 保存控制器时提交的通道。
///
/// 缺少 `id` / `channelNumber` 时由服务端补齐。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInput {
    pub id: Option<String>,
    pub channel_number: Option<u32>,
    #[serde(default)]
    pub fixture_type: String,
    #[serde(default)]
    pub voltage: String,
    #[serde(default)]
    pub current: String,
    pub parallel_count: Option<u32>,
}

/// 控制器创建 / 更新请求体（整表提交）。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveControllerRequest {
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub controller_number: String,
    #[serde(default)]
    pub channels: Vec<ChannelInput>,
    pub power_limit: Option<f64>,
}

/// 单通道增改请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPatchRequest {
    pub fixture_type: Option<String>,
    pub voltage: Option<String>,
    pub current: Option<String>,
    pub parallel_count: Option<u32>,
}

/// 功率汇总。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerDto {
    pub total_watts: f64,
    pub limit_watts: Option<f64>,
    pub load_percent: Option<f64>,
    pub level: String,
}

/// 通道返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDto {
    pub id: String,
    pub channel_number: u32,
    pub fixture_type: String,
    pub voltage: String,
    pub current: String,
    pub parallel_count: u32,
    pub power_watts: f64,
}

/// 控制器返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerDto {
    pub id: String,
    pub campus: String,
    pub building: String,
    pub floor: String,
    pub zone: String,
    pub controller_number: String,
    pub channels: Vec<ChannelDto>,
    pub power_limit: Option<f64>,
    pub power: PowerDto,
    pub created_at: String,
    pub updated_at: String,
}

/// 批量删除结果。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResultDto {
    pub removed: usize,
}

// ============================================================================
// 仪表盘
// ============================================================================

/// 仪表盘统计。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_controllers: usize,
    pub with_warnings: usize,
    pub total_channels: usize,
}

/// 仪表盘中的控制器摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSummaryDto {
    pub id: String,
    pub zone: String,
    pub controller_number: String,
    pub channel_count: usize,
    pub power: PowerDto,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorNodeDto {
    pub name: String,
    pub controllers: Vec<ControllerSummaryDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingNodeDto {
    pub name: String,
    pub controller_count: usize,
    pub floors: Vec<FloorNodeDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusNodeDto {
    pub name: String,
    pub controller_count: usize,
    pub buildings: Vec<BuildingNodeDto>,
}

/// 仪表盘返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub stats: DashboardStatsDto,
    pub campuses: Vec<CampusNodeDto>,
}

// ============================================================================
// 模板
// ============================================================================

/// 模板中的通道形状。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelShapeDto {
    #[serde(default)]
    pub channel_number: u32,
    #[serde(default)]
    pub fixture_type: String,
    #[serde(default)]
    pub voltage: String,
    #[serde(default)]
    pub current: String,
    #[serde(default = "default_parallel_count")]
    pub parallel_count: u32,
}

/// 模板创建 / 更新请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub campus: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub zone: Option<String>,
    pub controller_number: Option<String>,
    pub power_limit: Option<f64>,
    #[serde(default)]
    pub channels: Vec<ChannelShapeDto>,
}

/// 以控制器生成模板的请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFromControllerRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// 套用模板的请求体：可携带当前草稿，缺省为空白草稿。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTemplateRequest {
    pub draft: Option<SaveControllerRequest>,
}

/// 模板返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub campus: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub zone: Option<String>,
    pub controller_number: Option<String>,
    pub power_limit: Option<f64>,
    pub channels: Vec<ChannelShapeDto>,
    pub created_at: String,
}

// ============================================================================
// 灯具预设
// ============================================================================

/// 灯具预设创建 / 更新请求体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFixtureRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub voltage: String,
    #[serde(default)]
    pub current: String,
}

/// 灯具预设返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDto {
    pub id: String,
    pub name: String,
    pub voltage: String,
    pub current: String,
    pub power_watts: f64,
    pub created_at: String,
}

// ============================================================================
// 导出与指标
// ============================================================================

/// 批量导出的分区查询参数。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionQuery {
    pub campus: String,
    pub building: Option<String>,
    pub floor: Option<String>,
}

/// 计数指标快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub controllers_saved: u64,
    pub save_failures: u64,
    pub validation_rejections: u64,
    pub records_deleted: u64,
    pub exports_generated: u64,
    pub export_failures: u64,
}
