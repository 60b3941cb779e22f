//! 控制器 CRUD handlers
//!
//! 提供控制器文档的增删改查接口：
//! - GET /controllers - 列出控制器（按保存顺序）
//! - POST /controllers - 新建控制器
//! - GET /controllers/{id} - 获取控制器详情
//! - PUT /controllers/{id} - 整表更新控制器
//! - DELETE /controllers/{id} - 删除控制器

use crate::AppState;
use crate::utils::{
    apply_controller_request, controller_to_dto, not_found_error, ok, save_error, storage_error,
};
use api_contract::{ControllerDto, SaveControllerRequest};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use ctrldoc_telemetry::{record_controller_saved, record_records_deleted};
use domain::ControllerData;

#[derive(serde::Deserialize)]
pub struct ControllerPath {
    pub controller_id: String,
}

/// 保存并返回控制器 DTO（供通道与模板 handlers 复用）
pub async fn save_and_respond(state: &AppState, controller: ControllerData) -> Response {
    match state.records.save_controller(controller).await {
        Ok(saved) => {
            record_controller_saved();
            ok(controller_to_dto(saved))
        }
        Err(err) => save_error(err),
    }
}

/// 读取控制器，不存在时返回 404 响应
pub async fn load_controller(state: &AppState, id: &str) -> Result<ControllerData, Response> {
    match state.records.find_controller(id).await {
        Ok(Some(controller)) => Ok(controller),
        Ok(None) => Err(not_found_error()),
        Err(err) => Err(storage_error(err)),
    }
}

/// 列出控制器
pub async fn list_controllers(State(state): State<AppState>) -> Response {
    match state.records.list_controllers().await {
        Ok(controllers) => {
            let data: Vec<ControllerDto> =
                controllers.into_iter().map(controller_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

/// 新建控制器
pub async fn create_controller(
    State(state): State<AppState>,
    Json(req): Json<SaveControllerRequest>,
) -> Response {
    let mut controller = ControllerData::new_draft();
    if let Err(response) = apply_controller_request(&mut controller, req) {
        return response;
    }
    save_and_respond(&state, controller).await
}

/// 获取控制器详情
pub async fn get_controller(
    State(state): State<AppState>,
    Path(path): Path<ControllerPath>,
) -> Response {
    match load_controller(&state, &path.controller_id).await {
        Ok(controller) => ok(controller_to_dto(controller)),
        Err(response) => response,
    }
}

/// 整表更新控制器
pub async fn update_controller(
    State(state): State<AppState>,
    Path(path): Path<ControllerPath>,
    Json(req): Json<SaveControllerRequest>,
) -> Response {
    let mut controller = match load_controller(&state, &path.controller_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    if let Err(response) = apply_controller_request(&mut controller, req) {
        return response;
    }
    save_and_respond(&state, controller).await
}

/// 删除控制器
pub async fn delete_controller(
    State(state): State<AppState>,
    Path(path): Path<ControllerPath>,
) -> Response {
    match state.records.delete_controller(&path.controller_id).await {
        Ok(true) => {
            record_records_deleted(1);
            ok(())
        }
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
