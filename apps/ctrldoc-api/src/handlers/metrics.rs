//! 计数指标快照。
//!
//! - GET /metrics

use crate::utils::ok;
use api_contract::MetricsSnapshotDto;
use axum::response::Response;
use ctrldoc_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    ok(MetricsSnapshotDto {
        controllers_saved: snapshot.controllers_saved,
        save_failures: snapshot.save_failures,
        validation_rejections: snapshot.validation_rejections,
        records_deleted: snapshot.records_deleted,
        exports_generated: snapshot.exports_generated,
        export_failures: snapshot.export_failures,
    })
}
