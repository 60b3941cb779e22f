use ctrldoc_export::document::{
    DISCLAIMER, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, fit_text, render_pdf, wrap_text,
};
use ctrldoc_export::{
    DocumentOptions, DrawOp, ExportError, Page, layout_controller_pages, layout_section_pages,
};
use domain::{Channel, ControllerData};

fn controller(number: &str, channels: usize) -> ControllerData {
    let mut controller = ControllerData::new_draft();
    controller.campus = "North".to_string();
    controller.building = "B1".to_string();
    controller.controller_number = number.to_string();
    controller.channels = (1..=channels as u32)
        .map(|n| {
            let mut channel = Channel::blank(n);
            channel.voltage = "24".to_string();
            channel.current = "0.625".to_string();
            channel.parallel_count = 4;
            channel
        })
        .collect();
    controller
}

fn header_count(page: &Page) -> usize {
    page.texts().filter(|text| *text == "Fixture Type").count()
}

fn ops_inside_page(page: &Page) -> bool {
    page.ops.iter().all(|op| match op {
        DrawOp::Text { x, y, .. } => {
            *x >= 0.0 && *x <= PAGE_WIDTH_MM && *y >= 0.0 && *y <= PAGE_HEIGHT_MM
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
        } => *x >= 0.0 && x + width <= PAGE_WIDTH_MM && *y >= 0.0 && y + height <= PAGE_HEIGHT_MM,
    })
}

#[test]
fn short_controller_fits_one_page() {
    let mut record = controller("C-01", 2);
    record.power_limit = Some(130.0);
    let pages = layout_controller_pages(&record, DocumentOptions::default());

    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    assert!(page.contains_text("Controller Documentation Sheet"));
    assert!(page.contains_text("Total Power: 120.00 W"));
    assert!(page.contains_text("Load: 92.3% of 130 W (warning)"));
    assert!(page.contains_text("Note: Total power output"));
    assert_eq!(header_count(page), 1);
    assert!(ops_inside_page(page));
}

#[test]
fn long_channel_list_paginates_with_repeated_header() {
    let record = controller("C-01", 80);
    let pages = layout_controller_pages(&record, DocumentOptions::default());

    assert!(pages.len() >= 3);
    for page in &pages {
        assert_eq!(header_count(page), 1);
    }
    assert!(pages[1].contains_text("C-01 (continued)"));
    let power_cells: usize = pages
        .iter()
        .map(|page| page.texts().filter(|text| *text == "60.00").count())
        .sum();
    assert_eq!(power_cells, 80);
    assert!(pages.iter().all(ops_inside_page));
    assert!(
        pages
            .last()
            .expect("last page")
            .contains_text("Total Power: 4800.00 W")
    );
}

#[test]
fn rows_per_page_caps_table_rows() {
    let record = controller("C-01", 10);
    let options = DocumentOptions {
        rows_per_page: Some(4),
    };
    let pages = layout_controller_pages(&record, options);
    assert_eq!(pages.len(), 3);
    for page in &pages {
        assert_eq!(header_count(page), 1);
    }
}

#[test]
fn no_limit_means_no_load_line() {
    let pages = layout_controller_pages(&controller("C-01", 1), DocumentOptions::default());
    assert!(!pages[0].contains_text("Load:"));
}

#[test]
fn batch_starts_each_controller_on_new_page() {
    let a = controller("C-01", 2);
    let b = controller("C-02", 3);
    let pages =
        layout_section_pages("North - B1", &[&a, &b], DocumentOptions::default()).expect("layout");

    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains_text("Section: North - B1"));
    assert!(pages[0].texts().any(|text| text == "C-01"));
    assert!(pages[1].texts().any(|text| text == "C-02"));
}

#[test]
fn empty_batch_is_rejected() {
    let result = layout_section_pages("North", &[], DocumentOptions::default());
    assert!(matches!(result, Err(ExportError::EmptyBatch)));
}

#[test]
fn long_text_is_truncated_and_wrapped() {
    let fitted = fit_text(&"W".repeat(100), 20.0, 9.0);
    assert!(fitted.ends_with("..."));
    assert!(fitted.chars().count() < 100);
    assert_eq!(fit_text("Strip", 20.0, 9.0), "Strip");

    let lines = wrap_text(DISCLAIMER, 180.0, 8.0);
    assert!(lines.len() >= 2);
    assert_eq!(lines.join(" "), DISCLAIMER);
}

#[test]
fn render_produces_pdf_bytes() {
    let record = controller("C-01", 40);
    let pages = layout_controller_pages(&record, DocumentOptions::default());
    let bytes = render_pdf("Controller Documentation", &pages).expect("render");
    assert!(bytes.starts_with(b"%PDF"));
}
