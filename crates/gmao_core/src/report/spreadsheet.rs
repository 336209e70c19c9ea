//! Styled workbook renderer.
//!
//! Layout constants (row heights, band widths, the double separator rule)
//! reproduce the fixed visual identity of the legacy exports; none of them
//! are user-configurable. Styles live in an immutable per-render table
//! instead of being registered on the workbook.

use std::path::Path;

use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet, XlsxError,
};

use crate::domain::Status;
use crate::error::AppError;
use crate::model::{
    format_caption, ReportBody, ReportModel, SummaryPair, TableRow, TextSection, TABLE_COLUMNS,
};
use crate::report::ReportConfig;
use crate::style::{status_fill, Emphasis};

/// Content spans columns A..J in both report modes.
const CONTENT_COLS: u16 = 10;

/// Logo target size in px, anchored to the top-left header cell.
const LOGO_SIZE_PX: f64 = 80.0;

/// Canonical column sizing rule, applied to the maximum rendered text length
/// of each column. The legacy `min(max(L+2,15),50)` clamp was dropped, see
/// DESIGN.md.
pub fn column_width(max_len: usize) -> f64 {
    if max_len < 10 {
        12.0
    } else if max_len < 20 {
        (max_len + 3) as f64
    } else if max_len < 40 {
        (max_len + 2) as f64
    } else {
        45.0
    }
}

fn xlsx_err(e: XlsxError) -> AppError {
    AppError::new("XLSX_RENDER_FAILED", "Spreadsheet rendering failed").with_details(e.to_string())
}

fn rgb(value: u32) -> Color {
    Color::RGB(value)
}

/// Immutable style table built once per render call.
struct SheetStyles {
    company: Format,
    subtitle: Format,
    separator: Format,
    title: Format,
    caption: Format,
    rule_dark: Format,
    rule_light: Format,
    subheader: Format,
    label: Format,
    important: Format,
    normal: Format,
    priority_high: Format,
    priority_medium: Format,
    status_resolved: Format,
    table_header: Format,
    text_block: Format,
    row_pending: Format,
    row_in_progress: Format,
    row_resolved: Format,
    row_plain: Format,
}

fn value_format(fill: u32, font: u32, border: u32) -> Format {
    Format::new()
        .set_font_name("Calibri")
        .set_font_size(11)
        .set_bold()
        .set_font_color(rgb(font))
        .set_background_color(rgb(fill))
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(rgb(border))
}

fn row_format(status: Status) -> Format {
    Format::new()
        .set_font_name("Calibri")
        .set_font_size(10)
        .set_font_color(rgb(0x374151))
        .set_background_color(rgb(status_fill(status)))
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(rgb(0xE5E7EB))
}

impl SheetStyles {
    fn build() -> Self {
        Self {
            company: Format::new()
                .set_font_name("Arial")
                .set_font_size(22)
                .set_bold()
                .set_font_color(rgb(0x1F2937))
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            subtitle: Format::new()
                .set_font_name("Arial")
                .set_font_size(11)
                .set_italic()
                .set_font_color(rgb(0x6B7280))
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            separator: Format::new().set_background_color(rgb(0xE5E7EB)),
            title: Format::new()
                .set_font_name("Arial")
                .set_font_size(16)
                .set_bold()
                .set_font_color(rgb(0xFFFFFF))
                .set_background_color(rgb(0x1F2937))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Medium)
                .set_border_color(rgb(0x374151)),
            caption: Format::new()
                .set_font_name("Arial")
                .set_font_size(9)
                .set_italic()
                .set_font_color(rgb(0x9CA3AF))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            rule_dark: Format::new().set_background_color(rgb(0x1F2937)),
            rule_light: Format::new().set_background_color(rgb(0x6B7280)),
            subheader: Format::new()
                .set_font_name("Calibri")
                .set_font_size(13)
                .set_bold()
                .set_font_color(rgb(0x1F2937))
                .set_background_color(rgb(0xF3F4F6))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Medium)
                .set_border_color(rgb(0x6B7280)),
            label: Format::new()
                .set_font_name("Calibri")
                .set_font_size(11)
                .set_bold()
                .set_font_color(rgb(0x374151))
                .set_background_color(rgb(0xF9FAFB))
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(rgb(0xE5E7EB)),
            important: value_format(0xEFF6FF, 0x1F2937, 0xDBEAFE),
            normal: Format::new()
                .set_font_name("Calibri")
                .set_font_size(11)
                .set_font_color(rgb(0x374151))
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(rgb(0xE5E7EB)),
            priority_high: value_format(0xFEE2E2, 0xDC2626, 0xF87171),
            priority_medium: value_format(0xFEF3C7, 0xD97706, 0xFBBF24),
            status_resolved: value_format(0xD1FAE5, 0x059669, 0x34D399),
            table_header: Format::new()
                .set_font_name("Calibri")
                .set_font_size(12)
                .set_bold()
                .set_font_color(rgb(0xFFFFFF))
                .set_background_color(rgb(0x1F2937))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(rgb(0x374151)),
            text_block: Format::new()
                .set_font_name("Calibri")
                .set_font_size(10)
                .set_font_color(rgb(0x374151))
                .set_background_color(rgb(0xFEFEFE))
                .set_text_wrap()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::Top)
                .set_border(FormatBorder::Medium)
                .set_border_color(rgb(0xD1D5DB)),
            row_pending: row_format(Status::Pending),
            row_in_progress: row_format(Status::InProgress),
            row_resolved: row_format(Status::Resolved),
            row_plain: row_format(Status::Closed),
        }
    }

    fn emphasis(&self, emphasis: Emphasis) -> &Format {
        match emphasis {
            Emphasis::Normal => &self.normal,
            Emphasis::Important => &self.important,
            Emphasis::PriorityHigh => &self.priority_high,
            Emphasis::PriorityMedium => &self.priority_medium,
            Emphasis::StatusResolved => &self.status_resolved,
        }
    }

    /// Status-driven row fill is the canonical tabular policy; the
    /// alternating-stripe variant was dropped (see DESIGN.md).
    fn row(&self, status: Status) -> &Format {
        match status {
            Status::Pending => &self.row_pending,
            Status::InProgress => &self.row_in_progress,
            Status::Resolved => &self.row_resolved,
            Status::Closed => &self.row_plain,
        }
    }
}

/// Tracks the maximum rendered text length per column as content cells are
/// written; decorative bands (logo row, title bar, rules) do not count.
struct ColumnWidths {
    max_len: Vec<usize>,
}

impl ColumnWidths {
    fn new() -> Self {
        Self {
            max_len: vec![0; CONTENT_COLS as usize],
        }
    }

    fn note(&mut self, col: u16, text: &str) {
        let len = text.chars().count();
        let slot = &mut self.max_len[col as usize];
        if len > *slot {
            *slot = len;
        }
    }

    fn apply(&self, worksheet: &mut Worksheet) -> Result<(), XlsxError> {
        for (col, len) in self.max_len.iter().enumerate() {
            worksheet.set_column_width(col as u16, column_width(*len))?;
        }
        Ok(())
    }
}

fn insert_logo(worksheet: &mut Worksheet, path: &Path) {
    if !path.is_file() {
        return;
    }
    // A broken asset is treated the same as a missing one.
    let Ok(mut image) = Image::new(path) else {
        return;
    };
    let (w, h) = (image.width(), image.height());
    if w > 0.0 && h > 0.0 {
        image = image
            .set_scale_width(LOGO_SIZE_PX / w)
            .set_scale_height(LOGO_SIZE_PX / h);
    }
    let _ = worksheet.insert_image(0, 0, &image);
}

/// Fixed header block: logo, company band, title bar, generation caption and
/// the double separator rule. Returns the first body row.
fn write_header(
    worksheet: &mut Worksheet,
    styles: &SheetStyles,
    model: &ReportModel,
    config: &ReportConfig,
) -> Result<u32, AppError> {
    for (row, height) in [(0, 60.0), (1, 20.0), (2, 15.0), (3, 25.0), (4, 18.0), (5, 8.0)] {
        worksheet.set_row_height(row, height).map_err(xlsx_err)?;
    }

    if let Some(path) = config.logo_path.as_deref() {
        insert_logo(worksheet, path);
    }

    worksheet
        .merge_range(0, 2, 0, CONTENT_COLS - 1, &config.company_name, &styles.company)
        .map_err(xlsx_err)?;
    worksheet
        .merge_range(
            1,
            2,
            1,
            CONTENT_COLS - 1,
            &config.company_subtitle,
            &styles.subtitle,
        )
        .map_err(xlsx_err)?;

    for col in 0..CONTENT_COLS {
        worksheet.write_blank(2, col, &styles.separator).map_err(xlsx_err)?;
    }

    worksheet
        .merge_range(3, 0, 3, CONTENT_COLS - 1, &model.title, &styles.title)
        .map_err(xlsx_err)?;

    let caption = format!("Report generated on {}", format_caption(model.generated_at)?);
    worksheet
        .merge_range(4, 0, 4, CONTENT_COLS - 1, &caption, &styles.caption)
        .map_err(xlsx_err)?;

    for col in 0..CONTENT_COLS {
        worksheet.write_blank(5, col, &styles.rule_dark).map_err(xlsx_err)?;
        worksheet.write_blank(6, col, &styles.rule_light).map_err(xlsx_err)?;
    }

    Ok(8)
}

/// Label/value pairs laid out two per row (A/B then D/E) under a subheader
/// band, so wide sheets use their horizontal space.
fn write_summary(
    worksheet: &mut Worksheet,
    styles: &SheetStyles,
    model: &ReportModel,
    start_row: u32,
    widths: &mut ColumnWidths,
) -> Result<u32, AppError> {
    let mut row = start_row + 1;
    worksheet
        .merge_range(row, 0, row, 5, &model.summary_title, &styles.subheader)
        .map_err(xlsx_err)?;
    worksheet.set_row_height(row, 30.0).map_err(xlsx_err)?;
    row += 2;

    let write_pair =
        |worksheet: &mut Worksheet, row: u32, col: u16, pair: &SummaryPair| -> Result<(), AppError> {
            worksheet
                .write_string_with_format(row, col, &pair.label, &styles.label)
                .map_err(xlsx_err)?;
            worksheet
                .write_string_with_format(row, col + 1, &pair.value, styles.emphasis(pair.emphasis))
                .map_err(xlsx_err)?;
            Ok(())
        };

    for chunk in model.summary.chunks(2) {
        write_pair(worksheet, row, 0, &chunk[0])?;
        widths.note(0, &chunk[0].label);
        widths.note(1, &chunk[0].value);
        if let Some(pair) = chunk.get(1) {
            write_pair(worksheet, row, 3, pair)?;
            widths.note(3, &pair.label);
            widths.note(4, &pair.value);
        }
        row += 1;
    }

    Ok(row + 1)
}

/// Titled band plus a bordered, wrapped text cell spanning three merged rows
/// so long diagnosis text stays readable.
fn write_text_section(
    worksheet: &mut Worksheet,
    styles: &SheetStyles,
    start_row: u32,
    section: &TextSection,
    widths: &mut ColumnWidths,
) -> Result<u32, AppError> {
    worksheet
        .merge_range(start_row, 0, start_row, 5, &section.title, &styles.subheader)
        .map_err(xlsx_err)?;
    worksheet.set_row_height(start_row, 25.0).map_err(xlsx_err)?;

    let content_row = start_row + 1;
    worksheet
        .merge_range(content_row, 0, content_row + 2, 5, &section.body, &styles.text_block)
        .map_err(xlsx_err)?;
    worksheet.set_row_height(content_row, 60.0).map_err(xlsx_err)?;
    widths.note(0, &section.body);

    Ok(content_row + 4)
}

fn write_table(
    worksheet: &mut Worksheet,
    styles: &SheetStyles,
    start_row: u32,
    title: &str,
    rows: &[TableRow],
    widths: &mut ColumnWidths,
) -> Result<u32, AppError> {
    let mut row = start_row + 1;
    worksheet
        .merge_range(row, 0, row, CONTENT_COLS - 1, title, &styles.subheader)
        .map_err(xlsx_err)?;
    worksheet.set_row_height(row, 30.0).map_err(xlsx_err)?;
    row += 2;

    for (col, header) in TABLE_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(row, col as u16, *header, &styles.table_header)
            .map_err(xlsx_err)?;
        widths.note(col as u16, header);
    }
    worksheet.set_row_height(row, 25.0).map_err(xlsx_err)?;
    row += 1;

    for table_row in rows {
        let format = styles.row(table_row.status);
        for (col, cell) in table_row.cells.iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, cell, format)
                .map_err(xlsx_err)?;
            widths.note(col as u16, cell);
        }
        worksheet.set_row_height(row, 20.0).map_err(xlsx_err)?;
        row += 1;
    }

    Ok(row)
}

/// Render the model into a finished workbook byte stream. One sheet, named
/// after the report subject.
pub fn render(model: &ReportModel, config: &ReportConfig) -> Result<Vec<u8>, AppError> {
    let styles = SheetStyles::build();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&model.subject).map_err(xlsx_err)?;

    let mut widths = ColumnWidths::new();

    let body_start = write_header(worksheet, &styles, model, config)?;
    let mut row = write_summary(worksheet, &styles, model, body_start, &mut widths)?;

    match &model.body {
        ReportBody::Detail(sections) => {
            row += 1;
            for section in sections {
                row = write_text_section(worksheet, &styles, row, section, &mut widths)?;
            }
        }
        ReportBody::Table { title, rows } => {
            write_table(worksheet, &styles, row + 1, title, rows, &mut widths)?;
        }
    }

    widths.apply(worksheet).map_err(xlsx_err)?;

    workbook.save_to_buffer().map_err(xlsx_err)
}
