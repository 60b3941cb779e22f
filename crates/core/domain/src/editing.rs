//! 控制器草稿编辑
//!
//! - 通道增删改（编号单调递增，至少保留一个通道）
//! - 模板的生成与套用
//! - 保存前的必填校验

use crate::error::DomainError;
use crate::models::{Channel, ChannelShape, ControllerData, ControllerTemplate, FixtureConfig, new_id};
use chrono::Utc;
use std::collections::HashSet;

/// 通道字段的部分更新。
#[derive(Debug, Clone, Default)]
pub struct ChannelPatch {
    pub fixture_type: Option<String>,
    pub voltage: Option<String>,
    pub current: Option<String>,
    pub parallel_count: Option<u32>,
}

impl ChannelPatch {
    fn apply_to(self, channel: &mut Channel) {
        if let Some(fixture_type) = self.fixture_type {
            channel.fixture_type = fixture_type;
        }
        if let Some(voltage) = self.voltage {
            channel.voltage = voltage;
        }
        if let Some(current) = self.current {
            channel.current = current;
        }
        if let Some(parallel_count) = self.parallel_count {
            channel.parallel_count = parallel_count.max(1);
        }
    }
}

/// 下一个通道编号：现有最大编号 + 1，空列表为 1。
///
/// 最大编号已到 `u32::MAX` 时取最小的未占用正整数。
pub fn next_channel_number(channels: &[Channel]) -> u32 {
    let used: HashSet<u32> = channels.iter().map(|channel| channel.channel_number).collect();
    match used.iter().max() {
        None => 1,
        Some(max) => max
            .checked_add(1)
            .unwrap_or_else(|| lowest_free_number(&used)),
    }
}

fn lowest_free_number(used: &HashSet<u32>) -> u32 {
    (1..=u32::MAX)
        .find(|number| !used.contains(number))
        .unwrap_or(u32::MAX)
}

/// 追加一个新通道。
pub fn add_channel(controller: &mut ControllerData, patch: ChannelPatch) -> &Channel {
    let mut channel = Channel::blank(next_channel_number(&controller.channels));
    patch.apply_to(&mut channel);
    controller.channels.push(channel);
    &controller.channels[controller.channels.len() - 1]
}

/// 删除通道；最后一个通道不可删除。
pub fn remove_channel(
    controller: &mut ControllerData,
    channel_id: &str,
) -> Result<Channel, DomainError> {
    let idx = controller
        .channels
        .iter()
        .position(|channel| channel.id == channel_id)
        .ok_or_else(|| DomainError::ChannelNotFound(channel_id.to_string()))?;
    if controller.channels.len() == 1 {
        return Err(DomainError::LastChannel);
    }
    Ok(controller.channels.remove(idx))
}

/// 更新通道字段。
pub fn update_channel<'a>(
    controller: &'a mut ControllerData,
    channel_id: &str,
    patch: ChannelPatch,
) -> Result<&'a Channel, DomainError> {
    let channel = controller
        .channels
        .iter_mut()
        .find(|channel| channel.id == channel_id)
        .ok_or_else(|| DomainError::ChannelNotFound(channel_id.to_string()))?;
    patch.apply_to(channel);
    Ok(channel)
}

/// 为缺少 ID、ID 重复、编号为 0 或编号重复的通道补齐 ID 与编号。
///
/// 已有的合法编号保持不变，新编号从当前最大编号之后递增；
/// 递增越过 `u32::MAX` 后改取最小的未占用正整数。
pub fn normalize_channels(channels: &mut [Channel]) {
    let mut taken: HashSet<u32> = channels
        .iter()
        .map(|channel| channel.channel_number)
        .filter(|number| *number != 0)
        .collect();
    let mut next = taken.iter().max().map_or(Some(1), |max| max.checked_add(1));
    let mut kept = HashSet::new();
    let mut ids = HashSet::new();
    for channel in channels.iter_mut() {
        if channel.id.trim().is_empty() || !ids.insert(channel.id.clone()) {
            channel.id = new_id();
            ids.insert(channel.id.clone());
        }
        if channel.channel_number == 0 || !kept.insert(channel.channel_number) {
            let number = match next {
                Some(number) => {
                    next = number.checked_add(1);
                    number
                }
                None => lowest_free_number(&taken),
            };
            taken.insert(number);
            kept.insert(number);
            channel.channel_number = number;
        }
        channel.parallel_count = channel.parallel_count.max(1);
    }
}

impl ControllerTemplate {
    /// 以控制器当前内容生成模板。
    pub fn from_controller(
        controller: &ControllerData,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            campus: non_empty(&controller.campus),
            building: non_empty(&controller.building),
            floor: non_empty(&controller.floor),
            zone: non_empty(&controller.zone),
            controller_number: non_empty(&controller.controller_number),
            power_limit: controller.power_limit,
            channels: controller.channels.iter().map(ChannelShape::from).collect(),
            created_at: Utc::now(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn overwrite_if_populated(target: &mut String, value: &Option<String>) {
    if let Some(value) = value.as_deref().and_then(non_empty) {
        *target = value;
    }
}

/// 将模板套用到控制器草稿。
///
/// 通道列表整体替换（生成新 ID）；模板中非空的位置字段与功率上限覆盖草稿。
/// 模板没有通道时保留一个空白通道。
pub fn apply_template(controller: &mut ControllerData, template: &ControllerTemplate) {
    overwrite_if_populated(&mut controller.campus, &template.campus);
    overwrite_if_populated(&mut controller.building, &template.building);
    overwrite_if_populated(&mut controller.floor, &template.floor);
    overwrite_if_populated(&mut controller.zone, &template.zone);
    overwrite_if_populated(&mut controller.controller_number, &template.controller_number);
    if template.power_limit.is_some() {
        controller.power_limit = template.power_limit;
    }

    let mut channels: Vec<Channel> = template
        .channels
        .iter()
        .map(|shape| Channel {
            id: new_id(),
            channel_number: shape.channel_number,
            fixture_type: shape.fixture_type.clone(),
            voltage: shape.voltage.clone(),
            current: shape.current.clone(),
            parallel_count: shape.parallel_count.max(1),
        })
        .collect();
    if channels.is_empty() {
        channels.push(Channel::blank(1));
    }
    let numbers: HashSet<u32> = channels.iter().map(|channel| channel.channel_number).collect();
    if numbers.len() != channels.len() || numbers.contains(&0) {
        for (idx, channel) in channels.iter_mut().enumerate() {
            channel.channel_number = idx as u32 + 1;
        }
    }
    controller.channels = channels;
}

fn require(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(())
}

/// 控制器保存前校验：园区、楼宇、控制器编号必填，至少一个通道。
pub fn validate_controller(controller: &ControllerData) -> Result<(), DomainError> {
    require(&controller.campus, "campus")?;
    require(&controller.building, "building")?;
    require(&controller.controller_number, "controllerNumber")?;
    if controller.channels.is_empty() {
        return Err(DomainError::NoChannels);
    }
    Ok(())
}

/// 模板保存前校验：名称必填。
pub fn validate_template(template: &ControllerTemplate) -> Result<(), DomainError> {
    require(&template.name, "name")
}

/// 灯具预设保存前校验：名称、电压、电流必填。
pub fn validate_fixture(fixture: &FixtureConfig) -> Result<(), DomainError> {
    require(&fixture.name, "name")?;
    require(&fixture.voltage, "voltage")?;
    require(&fixture.current, "current")
}
