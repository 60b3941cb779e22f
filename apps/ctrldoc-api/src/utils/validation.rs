//! 输入验证与请求体转换
//!
//! 请求体到领域记录的转换：
//! - apply_controller_request：整表覆盖控制器草稿（通道 ID / 编号缺失或重复时重新分配）
//! - template_from_request / fixture_from_request：构造待保存的模板与灯具预设
//! - channel_patch：通道部分更新
//!
//! 验证规则：
//! - 文本字段去除首尾空格
//! - 必填项（园区、楼宇、控制器编号、模板名称等）交由存储层统一校验
//! - 功率上限必须为非负有限数

use crate::utils::response::bad_request_error;
use api_contract::{
    ChannelInput, ChannelPatchRequest, ChannelShapeDto, SaveControllerRequest, SaveFixtureRequest,
    SaveTemplateRequest,
};
use axum::response::Response;
use chrono::Utc;
use domain::{
    Channel, ChannelPatch, ChannelShape, ControllerData, ControllerTemplate, FixtureConfig,
    new_id, normalize_channels,
};

/// 可选文本：去除空格，空串视为未提供
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 验证功率上限
pub fn validate_power_limit(limit: Option<f64>) -> Result<Option<f64>, Response> {
    match limit {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(bad_request_error("powerLimit must be a non-negative number"))
        }
        other => Ok(other),
    }
}

fn channel_from_input(input: ChannelInput) -> Channel {
    Channel {
        id: normalize_optional(input.id).unwrap_or_default(),
        channel_number: input.channel_number.unwrap_or(0),
        fixture_type: input.fixture_type.trim().to_string(),
        voltage: input.voltage.trim().to_string(),
        current: input.current.trim().to_string(),
        parallel_count: input.parallel_count.unwrap_or(1).max(1),
    }
}

/// 用请求体覆盖控制器草稿（保留 id 与 createdAt）
pub fn apply_controller_request(
    controller: &mut ControllerData,
    req: SaveControllerRequest,
) -> Result<(), Response> {
    controller.power_limit = validate_power_limit(req.power_limit)?;
    controller.campus = req.campus.trim().to_string();
    controller.building = req.building.trim().to_string();
    controller.floor = req.floor.trim().to_string();
    controller.zone = req.zone.trim().to_string();
    controller.controller_number = req.controller_number.trim().to_string();
    controller.channels = req.channels.into_iter().map(channel_from_input).collect();
    normalize_channels(&mut controller.channels);
    Ok(())
}

/// 通道部分更新
pub fn channel_patch(req: ChannelPatchRequest) -> ChannelPatch {
    ChannelPatch {
        fixture_type: req.fixture_type.map(|value| value.trim().to_string()),
        voltage: req.voltage.map(|value| value.trim().to_string()),
        current: req.current.map(|value| value.trim().to_string()),
        parallel_count: req.parallel_count,
    }
}

fn shape_from_dto(dto: ChannelShapeDto) -> ChannelShape {
    ChannelShape {
        channel_number: dto.channel_number,
        fixture_type: dto.fixture_type.trim().to_string(),
        voltage: dto.voltage.trim().to_string(),
        current: dto.current.trim().to_string(),
        parallel_count: dto.parallel_count.max(1),
    }
}

/// 构造待保存的模板；更新时沿用原 id 与 createdAt
pub fn template_from_request(
    req: SaveTemplateRequest,
    existing: Option<&ControllerTemplate>,
) -> Result<ControllerTemplate, Response> {
    Ok(ControllerTemplate {
        id: existing.map_or_else(new_id, |template| template.id.clone()),
        name: req.name.trim().to_string(),
        description: normalize_optional(req.description).unwrap_or_default(),
        campus: normalize_optional(req.campus),
        building: normalize_optional(req.building),
        floor: normalize_optional(req.floor),
        zone: normalize_optional(req.zone),
        controller_number: normalize_optional(req.controller_number),
        power_limit: validate_power_limit(req.power_limit)?,
        channels: req.channels.into_iter().map(shape_from_dto).collect(),
        created_at: existing.map_or_else(Utc::now, |template| template.created_at),
    })
}

/// 构造待保存的灯具预设；更新时沿用原 id 与 createdAt
pub fn fixture_from_request(
    req: SaveFixtureRequest,
    existing: Option<&FixtureConfig>,
) -> FixtureConfig {
    FixtureConfig {
        id: existing.map_or_else(new_id, |fixture| fixture.id.clone()),
        name: req.name.trim().to_string(),
        voltage: req.voltage.trim().to_string(),
        current: req.current.trim().to_string(),
        created_at: existing.map_or_else(Utc::now, |fixture| fixture.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_request_fills_channel_ids_and_numbers() {
        let mut controller = ControllerData::new_draft();
        let req = SaveControllerRequest {
            campus: " North ".to_string(),
            building: "B1".to_string(),
            controller_number: "C-01".to_string(),
            channels: vec![
                ChannelInput {
                    channel_number: Some(3),
                    voltage: "24".to_string(),
                    ..ChannelInput::default()
                },
                ChannelInput::default(),
                ChannelInput {
                    channel_number: Some(3),
                    ..ChannelInput::default()
                },
            ],
            ..SaveControllerRequest::default()
        };
        apply_controller_request(&mut controller, req).expect("apply");

        assert_eq!(controller.campus, "North");
        let numbers: Vec<u32> = controller
            .channels
            .iter()
            .map(|channel| channel.channel_number)
            .collect();
        assert_eq!(numbers, vec![3, 4, 5]);
        assert!(controller.channels.iter().all(|channel| !channel.id.is_empty()));
        assert!(controller.channels.iter().all(|channel| channel.parallel_count == 1));
    }

    #[test]
    fn negative_power_limit_is_rejected() {
        let mut controller = ControllerData::new_draft();
        let req = SaveControllerRequest {
            power_limit: Some(-5.0),
            ..SaveControllerRequest::default()
        };
        let response = apply_controller_request(&mut controller, req).expect_err("rejected");
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn optional_text_drops_blanks() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(normalize_optional(Some(" B1 ".to_string())), Some("B1".to_string()));
        assert_eq!(normalize_optional(None), None);
    }
}
