//! 记录模型
//!
//! 三个独立集合中的实体：
//! - ControllerData：控制器文档（位置 + 通道列表 + 功率上限）
//! - ControllerTemplate：新建控制器时使用的可复用模板
//! - FixtureConfig：灯具电压/电流预设
//!
//! 持久化字段统一使用 camelCase，与已有的 JSON 数组布局保持一致。

use crate::power::{self, PowerSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_parallel_count() -> u32 {
    1
}

/// 生成新的记录 ID。
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 控制器上的一个输出通道。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
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

impl Channel {
    /// 空白通道（仅编号）。
    pub fn blank(channel_number: u32) -> Self {
        Self {
            id: new_id(),
            channel_number,
            fixture_type: String::new(),
            voltage: String::new(),
            current: String::new(),
            parallel_count: 1,
        }
    }

    /// 通道功率（W）。
    pub fn power(&self) -> f64 {
        power::channel_power(&self.voltage, &self.current, self.parallel_count)
    }
}

/// 模板中的通道形状（不含 ID）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelShape {
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

impl From<&Channel> for ChannelShape {
    fn from(channel: &Channel) -> Self {
        Self {
            channel_number: channel.channel_number,
            fixture_type: channel.fixture_type.clone(),
            voltage: channel.voltage.clone(),
            current: channel.current.clone(),
            parallel_count: channel.parallel_count,
        }
    }
}

/// 控制器文档记录。
///
/// 身份只由 `id` 决定；(campus, building, floor, zone, controllerNumber)
/// 不做唯一性约束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerData {
    pub id: String,
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
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_limit: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ControllerData {
    /// 新建控制器草稿：一个空白的 1 号通道，时间戳为当前时间。
    pub fn new_draft() -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            campus: String::new(),
            building: String::new(),
            floor: String::new(),
            zone: String::new(),
            controller_number: String::new(),
            channels: vec![Channel::blank(1)],
            power_limit: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 所有通道功率之和（W）。
    pub fn total_power(&self) -> f64 {
        power::total_power(&self.channels)
    }

    pub fn power_summary(&self) -> PowerSummary {
        PowerSummary::new(self.total_power(), self.power_limit)
    }

    pub fn find_channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.id == channel_id)
    }
}

/// 控制器模板。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_limit: Option<f64>,
    #[serde(default)]
    pub channels: Vec<ChannelShape>,
    pub created_at: DateTime<Utc>,
}

/// 灯具电压/电流预设。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureConfig {
    pub id: String,
    pub name: String,
    pub voltage: String,
    pub current: String,
    pub created_at: DateTime<Utc>,
}

impl FixtureConfig {
    pub fn new(
        name: impl Into<String>,
        voltage: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            voltage: voltage.into(),
            current: current.into(),
            created_at: Utc::now(),
        }
    }

    /// 单个灯具的功率（W）。
    pub fn power(&self) -> f64 {
        power::channel_power(&self.voltage, &self.current, 1)
    }
}
