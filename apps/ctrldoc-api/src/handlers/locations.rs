//! 按位置批量删除 handlers
//!
//! - DELETE /campuses/{campus} - 删除园区下全部控制器
//! - DELETE /campuses/{campus}/buildings/{building} - 删除楼宇下全部控制器
//! - DELETE /campuses/{campus}/buildings/{building}/floors/{floor} - 删除楼层下全部控制器
//!
//! 位置字段按字符串精确匹配，仪表盘的占位名（如 `Unknown Floor`）对应空字段；
//! 返回删除数量（可以为 0）。

use crate::AppState;
use crate::utils::{ok, storage_error};
use api_contract::DeleteResultDto;
use axum::{
    extract::{Path, State},
    response::Response,
};
use ctrldoc_storage::StorageError;
use ctrldoc_telemetry::record_records_deleted;
use domain::{UNKNOWN_BUILDING, UNKNOWN_CAMPUS, UNKNOWN_FLOOR, stored_location};
use tracing::info;

#[derive(serde::Deserialize)]
pub struct CampusPath {
    campus: String,
}

#[derive(serde::Deserialize)]
pub struct BuildingPath {
    campus: String,
    building: String,
}

#[derive(serde::Deserialize)]
pub struct FloorPath {
    campus: String,
    building: String,
    floor: String,
}

fn deleted_response(result: Result<usize, StorageError>) -> Response {
    match result {
        Ok(removed) => {
            record_records_deleted(removed as u64);
            ok(DeleteResultDto { removed })
        }
        Err(err) => storage_error(err),
    }
}

/// 删除园区
pub async fn delete_campus(State(state): State<AppState>, Path(path): Path<CampusPath>) -> Response {
    info!(campus = %path.campus, "delete campus");
    deleted_response(
        state
            .records
            .delete_by_campus(stored_location(&path.campus, UNKNOWN_CAMPUS))
            .await,
    )
}

/// 删除楼宇
pub async fn delete_building(
    State(state): State<AppState>,
    Path(path): Path<BuildingPath>,
) -> Response {
    info!(campus = %path.campus, building = %path.building, "delete building");
    deleted_response(
        state
            .records
            .delete_by_building(
                stored_location(&path.campus, UNKNOWN_CAMPUS),
                stored_location(&path.building, UNKNOWN_BUILDING),
            )
            .await,
    )
}

/// 删除楼层
pub async fn delete_floor(State(state): State<AppState>, Path(path): Path<FloorPath>) -> Response {
    info!(
        campus = %path.campus,
        building = %path.building,
        floor = %path.floor,
        "delete floor"
    );
    deleted_response(
        state
            .records
            .delete_by_floor(
                stored_location(&path.campus, UNKNOWN_CAMPUS),
                stored_location(&path.building, UNKNOWN_BUILDING),
                stored_location(&path.floor, UNKNOWN_FLOOR),
            )
            .await,
    )
}
