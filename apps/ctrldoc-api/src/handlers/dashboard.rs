//! 仪表盘 handler
//!
//! - GET /dashboard
//!
//! 重新读取全部控制器，按园区 / 楼宇 / 楼层分组并附带功率汇总。
//! 统计项：控制器总数、达到 caution 及以上的控制器数、通道总数。

use crate::AppState;
use crate::utils::{controller_summary_to_dto, ok, storage_error};
use api_contract::{
    BuildingNodeDto, CampusNodeDto, DashboardDto, DashboardStatsDto, FloorNodeDto,
};
use axum::{extract::State, response::Response};
use domain::{ControllerData, Hierarchy, group_by_location};

fn dashboard_stats(controllers: &[ControllerData]) -> DashboardStatsDto {
    DashboardStatsDto {
        total_controllers: controllers.len(),
        with_warnings: controllers
            .iter()
            .filter(|controller| controller.power_summary().level.is_flagged())
            .count(),
        total_channels: controllers
            .iter()
            .map(|controller| controller.channels.len())
            .sum(),
    }
}

fn hierarchy_to_dto(hierarchy: &Hierarchy<'_>) -> Vec<CampusNodeDto> {
    hierarchy
        .campuses
        .iter()
        .map(|campus| CampusNodeDto {
            name: campus.name.clone(),
            controller_count: campus.controllers().count(),
            buildings: campus
                .buildings
                .iter()
                .map(|building| BuildingNodeDto {
                    name: building.name.clone(),
                    controller_count: building.controllers().count(),
                    floors: building
                        .floors
                        .iter()
                        .map(|floor| FloorNodeDto {
                            name: floor.name.clone(),
                            controllers: floor
                                .controllers
                                .iter()
                                .map(|controller| controller_summary_to_dto(controller))
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// 获取仪表盘
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
    let controllers = match state.records.list_controllers().await {
        Ok(controllers) => controllers,
        Err(err) => return storage_error(err),
    };
    let hierarchy = group_by_location(&controllers);
    ok(DashboardDto {
        stats: dashboard_stats(&controllers),
        campuses: hierarchy_to_dto(&hierarchy),
    })
}
