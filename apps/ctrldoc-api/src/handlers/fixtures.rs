//! 灯具预设 handlers
//!
//! - GET /fixtures - 列出灯具预设
//! - POST /fixtures - 新建灯具预设
//! - GET /fixtures/{id} - 获取灯具预设
//! - PUT /fixtures/{id} - 更新灯具预设
//! - DELETE /fixtures/{id} - 删除灯具预设

use crate::AppState;
use crate::utils::{fixture_from_request, fixture_to_dto, not_found_error, ok, save_error, storage_error};
use api_contract::{FixtureDto, SaveFixtureRequest};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use domain::FixtureConfig;

#[derive(serde::Deserialize)]
pub struct FixturePath {
    fixture_id: String,
}

async fn load_fixture(state: &AppState, id: &str) -> Result<FixtureConfig, Response> {
    match state.records.find_fixture(id).await {
        Ok(Some(fixture)) => Ok(fixture),
        Ok(None) => Err(not_found_error()),
        Err(err) => Err(storage_error(err)),
    }
}

async fn save_fixture(state: &AppState, fixture: FixtureConfig) -> Response {
    match state.records.save_fixture(fixture).await {
        Ok(saved) => ok(fixture_to_dto(saved)),
        Err(err) => save_error(err),
    }
}

/// 列出灯具预设
pub async fn list_fixtures(State(state): State<AppState>) -> Response {
    match state.records.list_fixtures().await {
        Ok(fixtures) => {
            let data: Vec<FixtureDto> = fixtures.into_iter().map(fixture_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

/// 新建灯具预设
pub async fn create_fixture(
    State(state): State<AppState>,
    Json(req): Json<SaveFixtureRequest>,
) -> Response {
    save_fixture(&state, fixture_from_request(req, None)).await
}

/// 获取灯具预设
pub async fn get_fixture(State(state): State<AppState>, Path(path): Path<FixturePath>) -> Response {
    match load_fixture(&state, &path.fixture_id).await {
        Ok(fixture) => ok(fixture_to_dto(fixture)),
        Err(response) => response,
    }
}

/// 更新灯具预设
pub async fn update_fixture(
    State(state): State<AppState>,
    Path(path): Path<FixturePath>,
    Json(req): Json<SaveFixtureRequest>,
) -> Response {
    let existing = match load_fixture(&state, &path.fixture_id).await {
        Ok(fixture) => fixture,
        Err(response) => return response,
    };
    save_fixture(&state, fixture_from_request(req, Some(&existing))).await
}

/// 删除灯具预设
pub async fn delete_fixture(
    State(state): State<AppState>,
    Path(path): Path<FixturePath>,
) -> Response {
    match state.records.delete_fixture(&path.fixture_id).await {
        Ok(true) => ok(()),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
