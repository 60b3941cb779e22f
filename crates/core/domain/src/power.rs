//! 功率模型
//!
//! - parse_decimal：宽松的十进制解析（取最长数字前缀，非法为 0）
//! - channel_power：电压 × 电流 × 并联数
//! - total_power：控制器所有通道功率之和
//! - warning_level：按功率上限划分 none / caution / warning / critical

use crate::models::Channel;
use serde::{Deserialize, Serialize};

/// caution 阈值（占上限比例，含）。
pub const CAUTION_RATIO: f64 = 0.8;
/// warning 阈值（占上限比例，含）。
pub const WARNING_RATIO: f64 = 0.9;
/// critical 阈值（占上限比例，含）。
pub const CRITICAL_RATIO: f64 = 1.0;

/// 解析十进制字符串。
///
/// 去掉前导空白后取最长的合法数字前缀（`"24V"` → 24）；
/// 空串、非法或非有限值返回 0。
pub fn parse_decimal(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let end = decimal_prefix_len(trimmed);
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn decimal_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while idx < bytes.len() {
        match bytes[idx] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        idx += 1;
    }
    if digits == 0 {
        return 0;
    }
    if idx < bytes.len() && matches!(bytes[idx], b'e' | b'E') {
        let mut exp = idx + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            idx = exp;
        }
    }
    idx
}

/// 单通道功率（W），恒 ≥ 0。
///
/// 电压或电流 ≤ 0（含无法解析）时为 0；并联数 0 按 1 处理。
pub fn channel_power(voltage: &str, current: &str, parallel_count: u32) -> f64 {
    let volts = parse_decimal(voltage);
    let amps = parse_decimal(current);
    if volts <= 0.0 || amps <= 0.0 {
        return 0.0;
    }
    let power = volts * amps * f64::from(parallel_count.max(1));
    if power.is_finite() { power } else { 0.0 }
}

/// 通道功率之和（W）。
///
/// 先按数值排序再累加，结果与通道顺序无关。
pub fn total_power(channels: &[Channel]) -> f64 {
    let mut powers: Vec<f64> = channels.iter().map(Channel::power).collect();
    powers.sort_by(f64::total_cmp);
    powers.iter().sum()
}

/// 有效的功率上限：缺省、≤ 0 或非有限值视为未配置。
fn effective_limit(limit: Option<f64>) -> Option<f64> {
    limit.filter(|value| value.is_finite() && *value > 0.0)
}

/// 负载百分比（总功率 / 上限 × 100）。
pub fn load_percent(total: f64, limit: Option<f64>) -> Option<f64> {
    effective_limit(limit).map(|limit| total / limit * 100.0)
}

/// 功率告警等级。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    #[default]
    None,
    Caution,
    Warning,
    Critical,
}

impl WarningLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningLevel::None => "none",
            WarningLevel::Caution => "caution",
            WarningLevel::Warning => "warning",
            WarningLevel::Critical => "critical",
        }
    }

    /// caution 及以上。
    pub fn is_flagged(self) -> bool {
        self >= WarningLevel::Caution
    }
}

impl std::fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 按上限计算告警等级，高等级优先。
pub fn warning_level(total: f64, limit: Option<f64>) -> WarningLevel {
    let Some(limit) = effective_limit(limit) else {
        return WarningLevel::None;
    };
    if total >= limit * CRITICAL_RATIO {
        WarningLevel::Critical
    } else if total >= limit * WARNING_RATIO {
        WarningLevel::Warning
    } else if total >= limit * CAUTION_RATIO {
        WarningLevel::Caution
    } else {
        WarningLevel::None
    }
}

/// 单个控制器的功率汇总。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSummary {
    pub total_watts: f64,
    pub limit_watts: Option<f64>,
    pub load_percent: Option<f64>,
    pub level: WarningLevel,
}

impl PowerSummary {
    pub fn new(total_watts: f64, limit_watts: Option<f64>) -> Self {
        Self {
            total_watts,
            limit_watts,
            load_percent: load_percent(total_watts, limit_watts),
            level: warning_level(total_watts, limit_watts),
        }
    }
}

/// 功率显示格式：保留两位小数。
pub fn format_watts(watts: f64) -> String {
    format!("{watts:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_takes_numeric_prefix() {
        assert_eq!(parse_decimal("24"), 24.0);
        assert_eq!(parse_decimal(" 0.625"), 0.625);
        assert_eq!(parse_decimal("24V"), 24.0);
        assert_eq!(parse_decimal("1.5e2W"), 150.0);
        assert_eq!(parse_decimal("2e"), 2.0);
        assert_eq!(parse_decimal(".5"), 0.5);
        assert_eq!(parse_decimal("-3"), -3.0);
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(""), 0.0);
        assert_eq!(parse_decimal("abc"), 0.0);
        assert_eq!(parse_decimal("."), 0.0);
        assert_eq!(parse_decimal("-"), 0.0);
        assert_eq!(parse_decimal("NaN"), 0.0);
    }
}
