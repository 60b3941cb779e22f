//! 控制器文档领域模型。
//!
//! - [`models`]：控制器、通道、模板、灯具预设
//! - [`power`]：通道功率、总功率与告警等级
//! - [`hierarchy`]：园区 / 楼宇 / 楼层分组
//! - [`editing`]：草稿编辑、模板套用、保存校验

pub mod editing;
pub mod error;
pub mod hierarchy;
pub mod models;
pub mod power;

pub use editing::{
    ChannelPatch, add_channel, apply_template, next_channel_number, normalize_channels,
    remove_channel, update_channel, validate_controller, validate_fixture, validate_template,
};
pub use error::DomainError;
pub use hierarchy::{
    Hierarchy, UNKNOWN_BUILDING, UNKNOWN_CAMPUS, UNKNOWN_FLOOR, group_by_location, location_label,
    section_name, stored_location,
};
pub use models::{Channel, ChannelShape, ControllerData, ControllerTemplate, FixtureConfig, new_id};
pub use power::{
    PowerSummary, WarningLevel, channel_power, format_watts, load_percent, parse_decimal,
    total_power, warning_level,
};
