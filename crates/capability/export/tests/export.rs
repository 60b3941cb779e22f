use chrono::NaiveDate;
use ctrldoc_export::{
    DocumentOptions, ExportFormat, controller_file_name, export_controller, export_section,
    sanitize_component, section_file_name,
};
use domain::ControllerData;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("date")
}

fn controller(number: &str, building: &str) -> ControllerData {
    let mut controller = ControllerData::new_draft();
    controller.campus = "North".to_string();
    controller.building = building.to_string();
    controller.controller_number = number.to_string();
    controller
}

#[test]
fn single_file_name_follows_pattern() {
    let record = controller("C-01", "B1");
    assert_eq!(
        controller_file_name(&record, date(), ExportFormat::Xlsx),
        "Controller_C-01_B1_2024-03-05.xlsx"
    );
    let unnamed = controller("", "Main Hall/East");
    assert_eq!(
        controller_file_name(&unnamed, date(), ExportFormat::Pdf),
        "Controller_Doc_Main_Hall_East_2024-03-05.pdf"
    );
}

#[test]
fn section_file_name_is_sanitized() {
    assert_eq!(
        section_file_name("North - B1 - F2", date(), ExportFormat::Pdf),
        "North_-_B1_-_F2_2024-03-05.pdf"
    );
    assert_eq!(sanitize_component("  a//b  "), "a_b");
    assert_eq!(
        section_file_name("///", date(), ExportFormat::Xlsx),
        "Controllers_2024-03-05.xlsx"
    );
}

#[test]
fn export_controller_sets_name_and_type() {
    let record = controller("C-01", "B1");
    let file = export_controller(
        &record,
        ExportFormat::Pdf,
        date(),
        DocumentOptions::default(),
    )
    .expect("export");
    assert_eq!(file.file_name, "Controller_C-01_B1_2024-03-05.pdf");
    assert_eq!(file.content_type(), "application/pdf");
    assert!(!file.bytes.is_empty());
}

#[tokio::test]
async fn export_section_writes_atomically() {
    let a = controller("C-01", "B1");
    let b = controller("C-02", "B1");
    let file = export_section(
        "North - B1",
        &[&a, &b],
        ExportFormat::Xlsx,
        date(),
        DocumentOptions::default(),
    )
    .expect("export");

    let dir = tempfile::tempdir().expect("tempdir");
    let target = file.write_to_dir(dir.path()).await.expect("write");
    assert_eq!(target, dir.path().join("North_-_B1_2024-03-05.xlsx"));
    assert_eq!(std::fs::read(&target).expect("read"), file.bytes);

    let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(entries, 1);

    let nested = dir.path().join("archive").join("2024");
    let target = file.write_to_dir(&nested).await.expect("write nested");
    assert!(target.starts_with(&nested));
    assert_eq!(std::fs::read_dir(&nested).expect("read dir").count(), 1);
}

#[test]
fn empty_section_yields_no_file() {
    let result = export_section(
        "North",
        &[],
        ExportFormat::Pdf,
        date(),
        DocumentOptions::default(),
    );
    assert!(result.is_err());
}
