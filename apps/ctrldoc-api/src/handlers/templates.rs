//! 模板 handlers
//!
//! - GET /templates - 列出模板
//! - POST /templates - 新建模板
//! - GET /templates/{id} - 获取模板
//! - PUT /templates/{id} - 更新模板
//! - DELETE /templates/{id} - 删除模板
//! - POST /templates/{id}/apply - 套用模板，返回未保存的控制器草稿
//! - POST /controllers/{id}/template - 以控制器当前内容另存为模板
//!
//! 删除模板不影响由其创建的控制器。

use crate::AppState;
use crate::handlers::controllers::{ControllerPath, load_controller};
use crate::utils::{
    apply_controller_request, controller_to_dto, not_found_error, ok, save_error, storage_error,
    template_from_request, template_to_dto,
};
use api_contract::{
    ApplyTemplateRequest, SaveTemplateRequest, TemplateDto, TemplateFromControllerRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use domain::{ControllerData, ControllerTemplate};
use tracing::info;

#[derive(serde::Deserialize)]
pub struct TemplatePath {
    template_id: String,
}

async fn load_template(state: &AppState, id: &str) -> Result<ControllerTemplate, Response> {
    match state.records.find_template(id).await {
        Ok(Some(template)) => Ok(template),
        Ok(None) => Err(not_found_error()),
        Err(err) => Err(storage_error(err)),
    }
}

async fn save_template(state: &AppState, template: ControllerTemplate) -> Response {
    match state.records.save_template(template).await {
        Ok(saved) => ok(template_to_dto(saved)),
        Err(err) => save_error(err),
    }
}

/// 列出模板
pub async fn list_templates(State(state): State<AppState>) -> Response {
    match state.records.list_templates().await {
        Ok(templates) => {
            let data: Vec<TemplateDto> = templates.into_iter().map(template_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

/// 新建模板
pub async fn create_template(
    State(state): State<AppState>,
    Json(req): Json<SaveTemplateRequest>,
) -> Response {
    match template_from_request(req, None) {
        Ok(template) => save_template(&state, template).await,
        Err(response) => response,
    }
}

/// 获取模板
pub async fn get_template(
    State(state): State<AppState>,
    Path(path): Path<TemplatePath>,
) -> Response {
    match load_template(&state, &path.template_id).await {
        Ok(template) => ok(template_to_dto(template)),
        Err(response) => response,
    }
}

/// 更新模板
pub async fn update_template(
    State(state): State<AppState>,
    Path(path): Path<TemplatePath>,
    Json(req): Json<SaveTemplateRequest>,
) -> Response {
    let existing = match load_template(&state, &path.template_id).await {
        Ok(template) => template,
        Err(response) => return response,
    };
    match template_from_request(req, Some(&existing)) {
        Ok(template) => save_template(&state, template).await,
        Err(response) => response,
    }
}

/// 删除模板
pub async fn delete_template(
    State(state): State<AppState>,
    Path(path): Path<TemplatePath>,
) -> Response {
    match state.records.delete_template(&path.template_id).await {
        Ok(true) => ok(()),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 以控制器另存为模板
pub async fn create_template_from_controller(
    State(state): State<AppState>,
    Path(path): Path<ControllerPath>,
    Json(req): Json<TemplateFromControllerRequest>,
) -> Response {
    let controller = match load_controller(&state, &path.controller_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    let template = ControllerTemplate::from_controller(
        &controller,
        req.name.trim(),
        req.description.unwrap_or_default().trim(),
    );
    info!(controller_id = %controller.id, template_id = %template.id, "template from controller");
    save_template(&state, template).await
}

/// 套用模板：草稿不落库，由客户端确认后再保存
pub async fn apply_template(
    State(state): State<AppState>,
    Path(path): Path<TemplatePath>,
    Json(req): Json<ApplyTemplateRequest>,
) -> Response {
    let template = match load_template(&state, &path.template_id).await {
        Ok(template) => template,
        Err(response) => return response,
    };
    let mut draft = ControllerData::new_draft();
    if let Some(current) = req.draft {
        if let Err(response) = apply_controller_request(&mut draft, current) {
            return response;
        }
    }
    domain::apply_template(&mut draft, &template);
    ok(controller_to_dto(draft))
}
