//! 通道编辑 handlers
//!
//! - POST /controllers/{id}/channels - 追加通道（编号为现有最大值 + 1）
//! - PUT /controllers/{id}/channels/{channel_id} - 更新通道字段
//! - DELETE /controllers/{id}/channels/{channel_id} - 删除通道（至少保留一个）
//!
//! 每次编辑后整表保存控制器并返回最新的控制器 DTO。

use crate::AppState;
use crate::handlers::controllers::{load_controller, save_and_respond};
use crate::utils::{channel_patch, domain_error};
use api_contract::ChannelPatchRequest;
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};

#[derive(serde::Deserialize)]
pub struct ChannelPath {
    controller_id: String,
    channel_id: String,
}

#[derive(serde::Deserialize)]
pub struct ControllerChannelsPath {
    controller_id: String,
}

/// 追加通道
pub async fn add_channel(
    State(state): State<AppState>,
    Path(path): Path<ControllerChannelsPath>,
    Json(req): Json<ChannelPatchRequest>,
) -> Response {
    let mut controller = match load_controller(&state, &path.controller_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    domain::add_channel(&mut controller, channel_patch(req));
    save_and_respond(&state, controller).await
}

/// 更新通道
pub async fn update_channel(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    Json(req): Json<ChannelPatchRequest>,
) -> Response {
    let mut controller = match load_controller(&state, &path.controller_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    if let Err(err) = domain::update_channel(&mut controller, &path.channel_id, channel_patch(req)) {
        return domain_error(err);
    }
    save_and_respond(&state, controller).await
}

/// 删除通道
pub async fn remove_channel(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
) -> Response {
    let mut controller = match load_controller(&state, &path.controller_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    if let Err(err) = domain::remove_channel(&mut controller, &path.channel_id) {
        return domain_error(err);
    }
    save_and_respond(&state, controller).await
}
