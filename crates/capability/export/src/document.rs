//! 分页 PDF 导出
//!
//! 版面由纯函数生成：每页是一组绘制指令（文本 / 矩形框），单位毫米，原点在左下角。
//! `printpdf` 只负责把绘制指令编码为 PDF。
//!
//! 版面规则：
//! - 标题、分区名（批量导出）、位置信息
//! - 通道表格，每个单元格带矩形边框
//! - 纵向空间不足（或达到每页行数上限）时换页，续页重复表头
//! - 合计功率行；配置了上限时附负载百分比与告警等级
//! - 固定的容量提示
//! - 批量导出时每个控制器从新页开始

use crate::error::ExportError;
use crate::sheet::{SHEET_TITLE, TABLE_HEADERS, power_limit_label};
use domain::{ControllerData, format_watts};
use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const DISCLAIMER: &str = "Note: Total power output is used to determine controller limits \
and expected heat generation. Ensure the total does not exceed the controller's maximum rated \
capacity.";

const MARGIN: f32 = 15.0;
const TOP: f32 = PAGE_HEIGHT_MM - 18.0;
const BOTTOM: f32 = 18.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;
const NOTE_SIZE: f32 = 8.0;
const FIELD_LINE: f32 = 6.0;
const HEADER_ROW: f32 = 8.0;
const ROW: f32 = 7.0;
const NOTE_LINE: f32 = 4.0;
const CELL_PADDING: f32 = 1.5;
const COLUMN_WIDTHS: [f32; 6] = [18.0, 52.0, 25.0, 25.0, 28.0, 32.0];
// Helvetica 的平均字宽约为 0.5em，1pt ≈ 0.3528mm
const CHAR_WIDTH_PER_PT: f32 = 0.18;

/// 绘制指令。
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rect { .. } => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}

/// PDF 版面选项。
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentOptions {
    /// 每页最多的通道行数；None 表示只受纵向空间限制。
    pub rows_per_page: Option<usize>,
}

struct PageCursor {
    pages: Vec<Page>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            y: TOP,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = TOP;
    }

    fn fits(&self, height: f32) -> bool {
        !self.pages.is_empty() && self.y - height >= BOTTOM
    }

    fn push(&mut self, op: DrawOp) {
        if self.pages.is_empty() {
            self.new_page();
        }
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f32, size: f32, bold: bool, text: impl Into<String>) {
        let y = self.y;
        self.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            text: text.into(),
        });
    }

    fn table_row(&mut self, cells: &[String], height: f32, bold: bool) {
        let top = self.y;
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
            self.push(DrawOp::Rect {
                x,
                y: top - height,
                width,
                height,
            });
            self.push(DrawOp::Text {
                x: x + CELL_PADDING,
                y: top - height + (height - TABLE_SIZE * 0.3528) / 2.0,
                size: TABLE_SIZE,
                bold,
                text: fit_text(cell, width - 2.0 * CELL_PADDING, TABLE_SIZE),
            });
            x += width;
        }
        self.y = top - height;
    }

    fn table_header(&mut self) {
        let headers: Vec<String> = TABLE_HEADERS.iter().map(|header| header.to_string()).collect();
        self.table_row(&headers, HEADER_ROW, true);
    }
}

/// 按近似字宽截断文本，超长时以 `...` 结尾。
pub fn fit_text(text: &str, width_mm: f32, size: f32) -> String {
    let max_chars = (width_mm / (size * CHAR_WIDTH_PER_PT)).floor().max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut fitted: String = text.chars().take(max_chars - 3).collect();
    fitted.push_str("...");
    fitted
}

/// 按近似字宽贪心折行。
pub fn wrap_text(text: &str, width_mm: f32, size: f32) -> Vec<String> {
    let max_chars = ((width_mm / (size * CHAR_WIDTH_PER_PT)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn channel_cells(controller: &ControllerData) -> Vec<[String; 6]> {
    controller
        .channels
        .iter()
        .map(|channel| {
            [
                channel.channel_number.to_string(),
                channel.fixture_type.clone(),
                channel.voltage.clone(),
                channel.current.clone(),
                channel.parallel_count.max(1).to_string(),
                format_watts(channel.power()),
            ]
        })
        .collect()
}

fn layout_controller(
    cursor: &mut PageCursor,
    controller: &ControllerData,
    section: Option<&str>,
    options: DocumentOptions,
) {
    cursor.new_page();
    cursor.text(MARGIN, TITLE_SIZE, true, SHEET_TITLE);
    cursor.y -= 10.0;
    if let Some(section) = section {
        cursor.text(MARGIN, BODY_SIZE, false, format!("Section: {section}"));
        cursor.y -= 7.0;
    }

    let fields = [
        ("Campus", controller.campus.clone()),
        ("Building", controller.building.clone()),
        ("Floor", controller.floor.clone()),
        ("Zone", controller.zone.clone()),
        ("Controller Number", controller.controller_number.clone()),
        (
            "Power Limit",
            power_limit_label(controller.power_limit).unwrap_or_default(),
        ),
    ];
    for (label, value) in fields {
        cursor.text(MARGIN, BODY_SIZE, true, format!("{label}:"));
        cursor.text(MARGIN + 40.0, BODY_SIZE, false, value);
        cursor.y -= FIELD_LINE;
    }
    cursor.y -= 4.0;

    cursor.table_header();
    let mut rows_on_page = 0;
    for cells in channel_cells(controller) {
        let page_full = options
            .rows_per_page
            .is_some_and(|limit| rows_on_page >= limit);
        if page_full || !cursor.fits(ROW) {
            cursor.new_page();
            let number = if controller.controller_number.trim().is_empty() {
                "Controller".to_string()
            } else {
                controller.controller_number.clone()
            };
            cursor.text(MARGIN, BODY_SIZE, true, format!("{number} (continued)"));
            cursor.y -= 8.0;
            cursor.table_header();
            rows_on_page = 0;
        }
        cursor.table_row(&cells, ROW, false);
        rows_on_page += 1;
    }

    let summary = controller.power_summary();
    let note_lines = wrap_text(DISCLAIMER, PAGE_WIDTH_MM - 2.0 * MARGIN, NOTE_SIZE);
    let mut footer_height = 8.0 + 7.0 + NOTE_LINE * note_lines.len() as f32 + 2.0;
    if summary.load_percent.is_some() {
        footer_height += 6.0;
    }
    if !cursor.fits(footer_height) {
        cursor.new_page();
    }

    cursor.y -= 8.0;
    cursor.text(
        MARGIN,
        11.0,
        true,
        format!("Total Power: {} W", format_watts(summary.total_watts)),
    );
    if let (Some(percent), Some(limit)) = (summary.load_percent, summary.limit_watts) {
        cursor.y -= 6.0;
        cursor.text(
            MARGIN,
            BODY_SIZE,
            false,
            format!("Load: {percent:.1}% of {limit} W ({})", summary.level),
        );
    }
    cursor.y -= 7.0;
    for line in note_lines {
        cursor.text(MARGIN, NOTE_SIZE, false, line);
        cursor.y -= NOTE_LINE;
    }
}

/// 单个控制器的页面布局。
pub fn layout_controller_pages(
    controller: &ControllerData,
    options: DocumentOptions,
) -> Vec<Page> {
    let mut cursor = PageCursor::new();
    layout_controller(&mut cursor, controller, None, options);
    cursor.pages
}

/// 批量导出的页面布局：每个控制器从新页开始。
pub fn layout_section_pages(
    section_name: &str,
    controllers: &[&ControllerData],
    options: DocumentOptions,
) -> Result<Vec<Page>, ExportError> {
    if controllers.is_empty() {
        return Err(ExportError::EmptyBatch);
    }
    let mut cursor = PageCursor::new();
    for controller in controllers {
        layout_controller(&mut cursor, controller, Some(section_name), options);
    }
    Ok(cursor.pages)
}

fn pdf_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(err.to_string())
}

fn rect_outline(x: f32, y: f32, width: f32, height: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y + height)), false),
            (Point::new(Mm(x), Mm(y + height)), false),
        ],
        is_closed: true,
    }
}

/// 把页面布局编码为 PDF。
pub fn render_pdf(title: &str, pages: &[Page]) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut first = Some((first_page, first_layer));
    for page in pages {
        let (page_idx, layer_idx) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1"),
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        layer.set_outline_thickness(0.3);
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    bold: is_bold,
                    text,
                } => {
                    let font = if *is_bold { &bold } else { &regular };
                    layer.use_text(text.as_str(), *size, Mm(*x), Mm(*y), font);
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                } => layer.add_line(rect_outline(*x, *y, *width, *height)),
            }
        }
    }
    doc.save_to_bytes().map_err(pdf_error)
}
