use ctrldoc_telemetry::{
    metrics, record_controller_saved, record_export_failure, record_records_deleted,
};

#[test]
fn counters_only_grow() {
    let before = metrics().snapshot();
    record_controller_saved();
    record_records_deleted(3);
    record_export_failure();
    let after = metrics().snapshot();

    assert!(after.controllers_saved >= before.controllers_saved + 1);
    assert!(after.records_deleted >= before.records_deleted + 3);
    assert!(after.export_failures >= before.export_failures + 1);
    assert!(after.exports_generated >= before.exports_generated);
}
