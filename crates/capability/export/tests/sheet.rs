use ctrldoc_export::sheet::{SHEET_TITLE, batch_workbook, controller_workbook};
use ctrldoc_export::{Cell, ExportError, RowStyle, sheet_rows, unique_sheet_names};
use domain::{Channel, ControllerData};

fn controller(number: &str, channels: usize) -> ControllerData {
    let mut controller = ControllerData::new_draft();
    controller.campus = "North".to_string();
    controller.building = "B1".to_string();
    controller.floor = "F2".to_string();
    controller.zone = "Lobby".to_string();
    controller.controller_number = number.to_string();
    controller.channels = (1..=channels as u32)
        .map(|n| {
            let mut channel = Channel::blank(n);
            channel.fixture_type = "Strip".to_string();
            channel.voltage = "24".to_string();
            channel.current = "0.625".to_string();
            channel.parallel_count = 4;
            channel
        })
        .collect();
    controller
}

#[test]
fn row_layout_is_fixed() {
    let mut record = controller("C-01", 2);
    record.power_limit = Some(130.0);
    let rows = sheet_rows(&record);

    assert_eq!(rows.len(), 14);
    assert_eq!(rows[0].style, RowStyle::Title);
    assert_eq!(rows[0].cells[0].as_text(), Some(SHEET_TITLE));
    assert_eq!(rows[1].style, RowStyle::Blank);
    assert_eq!(rows[2].cells[0].as_text(), Some("Campus"));
    assert_eq!(rows[6].cells[1].as_text(), Some("C-01"));
    assert_eq!(rows[7].cells[0].as_text(), Some("Power Limit"));
    assert_eq!(rows[7].cells[1].as_text(), Some("130 W"));
    assert_eq!(rows[9].style, RowStyle::TableHeader);
    assert_eq!(rows[9].cells[5].as_text(), Some("Power (W)"));

    let channel_row = &rows[10];
    assert_eq!(channel_row.cells[0], Cell::Number(1.0));
    assert_eq!(channel_row.cells[4], Cell::Number(4.0));
    assert_eq!(channel_row.cells[5].as_text(), Some("60.00"));

    let total = rows.last().expect("total row");
    assert_eq!(total.style, RowStyle::Total);
    assert_eq!(total.cells[4].as_text(), Some("Total Power:"));
    assert_eq!(total.cells[5].as_text(), Some("120.00 W"));
}

#[test]
fn missing_limit_leaves_cell_empty() {
    let rows = sheet_rows(&controller("C-01", 1));
    assert_eq!(rows[7].cells[1], Cell::Empty);
}

#[test]
fn sheet_names_are_unique_and_short() {
    let long = "X".repeat(40);
    let a = controller("C-01", 1);
    let b = controller("c-01", 1);
    let c = controller(&long, 1);
    let d = controller(&long, 1);
    let e = controller("A/B:C", 1);
    let f = controller("", 1);
    let names = unique_sheet_names(&[&a, &b, &c, &d, &e, &f]);

    assert_eq!(names[0], "C-01");
    assert_eq!(names[1], "c-01 (2)");
    assert_eq!(names[2].chars().count(), 31);
    assert!(names[3].ends_with(" (2)"));
    assert_eq!(names[3].chars().count(), 31);
    assert_eq!(names[4], "A_B_C");
    assert_eq!(names[5], "Controller");
}

#[test]
fn truncated_sheet_names_never_end_with_apostrophe() {
    let number = format!("{}'BBBB", "A".repeat(30));
    let a = controller(&number, 1);
    let b = controller(&number, 1);
    let c = controller(&format!("{}'(x)", "Z".repeat(26)), 1);
    let d = controller(&format!("{}'(x)", "Z".repeat(26)), 1);
    let names = unique_sheet_names(&[&a, &b, &c, &d]);

    assert_eq!(names[0], "A".repeat(30));
    assert_eq!(names[1], format!("{} (2)", "A".repeat(27)));
    assert_eq!(names[2], format!("{}'(x)", "Z".repeat(26)));
    assert_eq!(names[3], format!("{} (2)", "Z".repeat(26)));
    for name in &names {
        assert!(!name.starts_with('\'') && !name.ends_with('\''));
    }

    let batch = batch_workbook(&[&a, &b, &c, &d]).expect("batch");
    assert!(batch.starts_with(b"PK"));
}

#[test]
fn workbooks_encode_as_zip() {
    let a = controller("C-01", 3);
    let b = controller("C-02", 1);
    let single = controller_workbook(&a).expect("single");
    assert!(single.starts_with(b"PK"));
    let batch = batch_workbook(&[&a, &b]).expect("batch");
    assert!(batch.starts_with(b"PK"));
}

#[test]
fn empty_batch_is_rejected() {
    assert!(matches!(batch_workbook(&[]), Err(ExportError::EmptyBatch)));
}
