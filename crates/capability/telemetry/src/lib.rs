//! 追踪、请求 ID 与计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub controllers_saved: u64,
    pub save_failures: u64,
    pub validation_rejections: u64,
    pub records_deleted: u64,
    pub exports_generated: u64,
    pub export_failures: u64,
}

/// 进程内计数指标。
#[derive(Default)]
pub struct TelemetryMetrics {
    controllers_saved: AtomicU64,
    save_failures: AtomicU64,
    validation_rejections: AtomicU64,
    records_deleted: AtomicU64,
    exports_generated: AtomicU64,
    export_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            controllers_saved: self.controllers_saved.load(Ordering::Relaxed),
            save_failures: self.save_failures.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            exports_generated: self.exports_generated.load(Ordering::Relaxed),
            export_failures: self.export_failures.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录控制器保存成功次数。
pub fn record_controller_saved() {
    metrics().controllers_saved.fetch_add(1, Ordering::Relaxed);
}

/// 记录保存失败次数（后端错误）。
pub fn record_save_failure() {
    metrics().save_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录校验拒绝次数。
pub fn record_validation_rejection() {
    metrics()
        .validation_rejections
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录删除的记录数。
pub fn record_records_deleted(count: u64) {
    metrics().records_deleted.fetch_add(count, Ordering::Relaxed);
}

/// 记录导出成功次数。
pub fn record_export_generated() {
    metrics().exports_generated.fetch_add(1, Ordering::Relaxed);
}

/// 记录导出失败次数。
pub fn record_export_failure() {
    metrics().export_failures.fetch_add(1, Ordering::Relaxed);
}
