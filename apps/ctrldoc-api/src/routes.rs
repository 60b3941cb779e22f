//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查与指标：/health, /metrics
//! - 仪表盘：/dashboard
//! - 控制器：/controllers/*（含通道增删改、另存为模板、导出）
//! - 按位置批量删除：/campuses/{campus}[/buildings/{building}[/floors/{floor}]]
//! - 模板：/templates/*（含套用）
//! - 灯具预设：/fixtures/*
//! - 分区批量导出：/exports/{xlsx,pdf}

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/dashboard", get(get_dashboard))
        .route("/controllers", get(list_controllers).post(create_controller))
        .route(
            "/controllers/:controller_id",
            get(get_controller)
                .put(update_controller)
                .delete(delete_controller),
        )
        .route("/controllers/:controller_id/channels", post(add_channel))
        .route(
            "/controllers/:controller_id/channels/:channel_id",
            put(update_channel).delete(remove_channel),
        )
        .route(
            "/controllers/:controller_id/template",
            post(create_template_from_controller),
        )
        .route(
            "/controllers/:controller_id/export/xlsx",
            get(export_controller_xlsx),
        )
        .route(
            "/controllers/:controller_id/export/pdf",
            get(export_controller_pdf),
        )
        .route("/campuses/:campus", delete(delete_campus))
        .route(
            "/campuses/:campus/buildings/:building",
            delete(delete_building),
        )
        .route(
            "/campuses/:campus/buildings/:building/floors/:floor",
            delete(delete_floor),
        )
        .route("/templates", get(list_templates).post(create_template))
        .route(
            "/templates/:template_id",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/templates/:template_id/apply", post(apply_template))
        .route("/fixtures", get(list_fixtures).post(create_fixture))
        .route(
            "/fixtures/:fixture_id",
            get(get_fixture).put(update_fixture).delete(delete_fixture),
        )
        .route("/exports/xlsx", get(export_section_xlsx))
        .route("/exports/pdf", get(export_section_pdf))
}
