//! xlsx 表格导出
//!
//! 行布局由 `sheet_rows` 纯函数生成，`rust_xlsxwriter` 只负责编码：
//! 1. 标题行 `Controller Documentation Sheet`
//! 2. 空行
//! 3. 位置信息（Campus / Building / Floor / Zone / Controller Number / Power Limit）
//! 4. 空行
//! 5. 通道表头 + 每个通道一行（功率保留两位小数）
//! 6. 空行
//! 7. 合计行 `Total Power:` / `<total> W`

use crate::error::ExportError;
use domain::{ControllerData, format_watts};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;

pub const SHEET_TITLE: &str = "Controller Documentation Sheet";
pub const SINGLE_SHEET_NAME: &str = "Controller";
pub const TABLE_HEADERS: [&str; 6] = [
    "Channel",
    "Fixture Type",
    "Voltage (V)",
    "Current (A)",
    "Parallel Count",
    "Power (W)",
];

const MAX_SHEET_NAME_CHARS: usize = 31;
const COLUMN_WIDTHS: [f64; 6] = [18.0, 28.0, 14.0, 14.0, 16.0, 14.0];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Blank,
    Title,
    Field,
    TableHeader,
    Channel,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub style: RowStyle,
    pub cells: Vec<Cell>,
}

impl SheetRow {
    fn blank() -> Self {
        Self {
            style: RowStyle::Blank,
            cells: Vec::new(),
        }
    }

    fn field(label: &str, value: Cell) -> Self {
        Self {
            style: RowStyle::Field,
            cells: vec![Cell::text(label), value],
        }
    }
}

/// 功率上限的展示文本。
pub fn power_limit_label(limit: Option<f64>) -> Option<String> {
    limit
        .filter(|value| value.is_finite() && *value > 0.0)
        .map(|value| format!("{value} W"))
}

/// 单个控制器的表格行布局。
pub fn sheet_rows(controller: &ControllerData) -> Vec<SheetRow> {
    let mut rows = vec![
        SheetRow {
            style: RowStyle::Title,
            cells: vec![Cell::text(SHEET_TITLE)],
        },
        SheetRow::blank(),
        SheetRow::field("Campus", Cell::text(&controller.campus)),
        SheetRow::field("Building", Cell::text(&controller.building)),
        SheetRow::field("Floor", Cell::text(&controller.floor)),
        SheetRow::field("Zone", Cell::text(&controller.zone)),
        SheetRow::field("Controller Number", Cell::text(&controller.controller_number)),
        SheetRow::field(
            "Power Limit",
            power_limit_label(controller.power_limit).map_or(Cell::Empty, Cell::Text),
        ),
        SheetRow::blank(),
        SheetRow {
            style: RowStyle::TableHeader,
            cells: TABLE_HEADERS.iter().map(|header| Cell::text(*header)).collect(),
        },
    ];

    rows.extend(controller.channels.iter().map(|channel| SheetRow {
        style: RowStyle::Channel,
        cells: vec![
            Cell::Number(f64::from(channel.channel_number)),
            Cell::text(&channel.fixture_type),
            Cell::text(&channel.voltage),
            Cell::text(&channel.current),
            Cell::Number(f64::from(channel.parallel_count.max(1))),
            Cell::Text(format_watts(channel.power())),
        ],
    }));

    rows.push(SheetRow::blank());
    rows.push(SheetRow {
        style: RowStyle::Total,
        cells: vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::text("Total Power:"),
            Cell::Text(format!("{} W", format_watts(controller.total_power()))),
        ],
    });
    rows
}

/// 批量工作簿的工作表名称：基于控制器编号，去除非法字符，≤ 31 字符且互不重复（不区分大小写）。
pub fn unique_sheet_names(controllers: &[&ControllerData]) -> Vec<String> {
    let mut used = HashSet::new();
    let mut names = Vec::with_capacity(controllers.len());
    for controller in controllers {
        let base = sheet_name_base(&controller.controller_number);
        let mut candidate = trim_sheet_name(&truncate_chars(&base, MAX_SHEET_NAME_CHARS));
        let mut suffix = 2;
        while !used.insert(candidate.to_lowercase()) {
            let tail = format!(" ({suffix})");
            let room = MAX_SHEET_NAME_CHARS - tail.chars().count();
            candidate = format!("{}{}", trim_sheet_name(&truncate_chars(&base, room)), tail);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn sheet_name_base(controller_number: &str) -> String {
    let cleaned: String = controller_number
        .chars()
        .map(|ch| match ch {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let cleaned = trim_sheet_name(&cleaned);
    if cleaned.is_empty() {
        SINGLE_SHEET_NAME.to_string()
    } else {
        cleaned
    }
}

// 工作表名首尾不能是撇号或空白
fn trim_sheet_name(name: &str) -> String {
    name.trim_matches(|ch: char| ch == '\'' || ch.is_whitespace())
        .to_string()
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[SheetRow]) -> Result<(), XlsxError> {
    let title = Format::new().set_bold().set_font_size(14);
    let bold = Format::new().set_bold();

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx as u32;
        for (col_idx, cell) in row.cells.iter().enumerate() {
            let col = col_idx as u16;
            let format = match (row.style, col_idx) {
                (RowStyle::Title, _) => Some(&title),
                (RowStyle::TableHeader | RowStyle::Total, _) => Some(&bold),
                (RowStyle::Field, 0) => Some(&bold),
                _ => None,
            };
            match (cell, format) {
                (Cell::Empty, _) => {}
                (Cell::Text(text), Some(format)) => {
                    worksheet.write_string_with_format(row_num, col, text, format)?;
                }
                (Cell::Text(text), None) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                (Cell::Number(value), Some(format)) => {
                    worksheet.write_number_with_format(row_num, col, *value, format)?;
                }
                (Cell::Number(value), None) => {
                    worksheet.write_number(row_num, col, *value)?;
                }
            }
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// 单个控制器的工作簿（工作表名 `Controller`）。
pub fn controller_workbook(controller: &ControllerData) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SINGLE_SHEET_NAME)?;
    write_rows(worksheet, &sheet_rows(controller))?;
    Ok(workbook.save_to_buffer()?)
}

/// 批量工作簿：每个控制器一个工作表。
pub fn batch_workbook(controllers: &[&ControllerData]) -> Result<Vec<u8>, ExportError> {
    if controllers.is_empty() {
        return Err(ExportError::EmptyBatch);
    }
    let mut workbook = Workbook::new();
    for (controller, name) in controllers.iter().zip(unique_sheet_names(controllers)) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_rows(worksheet, &sheet_rows(controller))?;
    }
    Ok(workbook.save_to_buffer()?)
}
