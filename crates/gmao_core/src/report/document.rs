//! Paginated document renderer.
//!
//! Two colors only: a dark accent for titles, rules and table lines, black
//! for body text. Layout is a top-down cursor over A4 pages with 1-inch
//! top/bottom margins; content that runs past the bottom margin continues on
//! a fresh page.

use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, Color, CustomPdfConformance, ImageTransform, IndirectFontRef, Line,
    Mm, PdfConformance, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfLayerReference,
    PdfPageIndex, Point, Rgb,
};

use crate::error::AppError;
use crate::model::{
    format_caption, truncate_chars, ReportBody, ReportModel, SummaryPair, TableRow, TextSection,
};
use crate::report::ReportConfig;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
/// 1 inch top/bottom.
const TOP_START: Mm = Mm(271.6);
const BOTTOM_MARGIN: Mm = Mm(25.4);
const LEFT: Mm = Mm(20.0);
const RIGHT: Mm = Mm(190.0);

/// Logo band square, 0.8 inch.
const LOGO_SIDE: Mm = Mm(20.32);

/// Six-column incident table offsets from the left margin, matching the
/// legacy column widths (0.6/2/0.8/0.8/0.8/1 inch).
const TABLE_X: [f32; 6] = [0.0, 15.24, 66.04, 86.36, 106.68, 127.0];
const TABLE_HEADERS: [&str; 6] = ["ID", "Equipment", "Priority", "Status", "Date", "Created by"];

const EQUIPMENT_MAX_CHARS: usize = 20;
const CREATED_BY_MAX_CHARS: usize = 10;

fn accent() -> Color {
    Color::Rgb(Rgb::new(0.12, 0.23, 0.54, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn pdf_err(e: impl std::fmt::Display) -> AppError {
    AppError::new("PDF_RENDER_FAILED", "Document rendering failed").with_details(e.to_string())
}

struct Fonts {
    bold: IndirectFontRef,
    regular: IndirectFontRef,
}

/// Cursor over the current page; `ensure` starts a fresh page when the next
/// block would cross the bottom margin.
struct Cursor {
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    y: Mm,
}

impl Cursor {
    fn layer(&self, doc: &PdfDocumentReference) -> PdfLayerReference {
        doc.get_page(self.page).get_layer(self.layer)
    }

    fn ensure(&mut self, doc: &PdfDocumentReference, needed: Mm) {
        if self.y < BOTTOM_MARGIN + needed {
            let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.page = page;
            self.layer = layer;
            self.y = TOP_START;
        }
    }
}

fn text(layer: &PdfLayerReference, s: &str, size: f32, x: Mm, y: Mm, font: &IndirectFontRef, color: Color) {
    layer.set_fill_color(color);
    layer.use_text(s, size, x, y, font);
}

fn rule(layer: &PdfLayerReference, y: Mm, thickness: f32) {
    layer.set_outline_color(accent());
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(LEFT, y), false),
            (Point::new(RIGHT, y), false),
        ],
        is_closed: false,
    });
}

/// Approximate centering for the footer; Helvetica's average advance is
/// close to half the font size.
fn centered_x(s: &str, size: f32) -> Mm {
    let half_width = s.chars().count() as f32 * size * 0.5 * 0.3528 / 2.0;
    Mm(105.0 - half_width)
}

/// Greedy word wrap on an approximate character count per line.
fn wrap_text(body: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in body.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            // Words longer than a full line are hard-split.
            let chunks: Vec<String> = word
                .chars()
                .collect::<Vec<_>>()
                .chunks(max_chars)
                .map(|c| c.iter().collect())
                .collect();
            for chunk in chunks {
                if line.is_empty() {
                    line = chunk;
                } else if line.chars().count() + 1 + chunk.chars().count() <= max_chars {
                    line.push(' ');
                    line.push_str(&chunk);
                } else {
                    lines.push(std::mem::take(&mut line));
                    line = chunk;
                }
            }
        }
        lines.push(line);
    }
    lines
}

fn load_logo(path: &Path) -> Option<printpdf::Image> {
    if !path.is_file() {
        return None;
    }
    let file = std::fs::File::open(path).ok()?;
    let decoder =
        printpdf::image_crate::codecs::png::PngDecoder::new(std::io::BufReader::new(file)).ok()?;
    printpdf::Image::try_from(decoder).ok()
}

/// Logo band with company name/subtitle to its right, falling back to a
/// plain text header when the asset is missing or undecodable, then a single
/// accent rule.
fn draw_header(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts, config: &ReportConfig) {
    let layer = cursor.layer(doc);
    let logo = config.logo_path.as_deref().and_then(load_logo);

    match logo {
        Some(image) => {
            let width_px = image.image.width.0 as f32;
            let height_px = image.image.height.0 as f32;
            // Rendered size at 300 dpi is px/300 inches; scale to 0.8 inch.
            let scale_x = if width_px > 0.0 { 240.0 / width_px } else { 1.0 };
            let scale_y = if height_px > 0.0 { 240.0 / height_px } else { 1.0 };
            image.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(LEFT),
                    translate_y: Some(cursor.y - Mm(18.0)),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    dpi: Some(300.0),
                    ..Default::default()
                },
            );
            let text_x = LEFT + LOGO_SIDE + Mm(5.0);
            text(&layer, &config.company_name, 16.0, text_x, cursor.y - Mm(8.0), &fonts.bold, accent());
            text(
                &layer,
                &config.company_subtitle,
                10.0,
                text_x,
                cursor.y - Mm(14.0),
                &fonts.regular,
                black(),
            );
            cursor.y = cursor.y - Mm(24.0);
        }
        None => {
            text(&layer, &config.company_name, 16.0, LEFT, cursor.y, &fonts.bold, accent());
            text(
                &layer,
                &config.company_subtitle,
                10.0,
                LEFT,
                cursor.y - Mm(6.0),
                &fonts.regular,
                black(),
            );
            cursor.y = cursor.y - Mm(12.0);
        }
    }

    rule(&layer, cursor.y, 1.5);
    cursor.y = cursor.y - Mm(10.0);
}

fn draw_title(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts, model: &ReportModel) -> Result<(), AppError> {
    let layer = cursor.layer(doc);
    text(&layer, &model.title, 18.0, LEFT, cursor.y, &fonts.bold, accent());
    cursor.y = cursor.y - Mm(8.0);
    let caption = format!("Generated: {}", format_caption(model.generated_at)?);
    text(&layer, &caption, 10.0, LEFT, cursor.y, &fonts.regular, black());
    cursor.y = cursor.y - Mm(12.0);
    Ok(())
}

fn draw_section_heading(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts, title: &str) {
    cursor.ensure(doc, Mm(25.0));
    let layer = cursor.layer(doc);
    text(&layer, title, 12.0, LEFT, cursor.y, &fonts.bold, accent());
    cursor.y = cursor.y - Mm(7.0);
}

/// Bordered two-column key/value block: a rule under every row but the last,
/// labels bold, values plain.
fn draw_kv_table(
    doc: &PdfDocumentReference,
    cursor: &mut Cursor,
    fonts: &Fonts,
    pairs: &[SummaryPair],
    value_x: Mm,
) {
    for (i, pair) in pairs.iter().enumerate() {
        cursor.ensure(doc, Mm(10.0));
        let layer = cursor.layer(doc);
        text(&layer, &pair.label, 10.0, LEFT, cursor.y, &fonts.bold, black());
        text(&layer, &pair.value, 10.0, value_x, cursor.y, &fonts.regular, black());
        if i + 1 < pairs.len() {
            rule(&layer, cursor.y - Mm(2.0), 0.5);
        }
        cursor.y = cursor.y - Mm(7.0);
    }
    cursor.y = cursor.y - Mm(5.0);
}

fn draw_text_section(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts, section: &TextSection) {
    draw_section_heading(doc, cursor, fonts, &section.title);
    for line in wrap_text(&section.body, 95) {
        cursor.ensure(doc, Mm(8.0));
        let layer = cursor.layer(doc);
        text(&layer, &line, 10.0, LEFT, cursor.y, &fonts.regular, black());
        cursor.y = cursor.y - Mm(5.0);
    }
    cursor.y = cursor.y - Mm(5.0);
}

/// Project a ten-column table row onto the six columns the document renders.
/// Equipment and author are truncated harder than the spreadsheet's
/// description column, and timestamps are rendered date-only here.
pub fn table_cells(row: &TableRow) -> [String; 6] {
    let date_only = row.cells[5]
        .split(' ')
        .next()
        .unwrap_or(row.cells[5].as_str());
    [
        row.cells[0].clone(),
        truncate_chars(&row.cells[1], EQUIPMENT_MAX_CHARS),
        row.cells[3].clone(),
        row.cells[4].clone(),
        date_only.to_string(),
        truncate_chars(&row.cells[6], CREATED_BY_MAX_CHARS),
    ]
}

fn draw_incident_table(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts, rows: &[TableRow]) {
    cursor.ensure(doc, Mm(15.0));
    {
        let layer = cursor.layer(doc);
        for (i, header) in TABLE_HEADERS.iter().enumerate() {
            text(&layer, header, 9.0, LEFT + Mm(TABLE_X[i]), cursor.y, &fonts.bold, black());
        }
        rule(&layer, cursor.y - Mm(2.0), 1.0);
    }
    cursor.y = cursor.y - Mm(7.0);

    for row in rows {
        cursor.ensure(doc, Mm(8.0));
        let cells = table_cells(row);
        let layer = cursor.layer(doc);
        for (i, cell) in cells.iter().enumerate() {
            text(&layer, cell, 8.0, LEFT + Mm(TABLE_X[i]), cursor.y, &fonts.regular, black());
        }
        rule(&layer, cursor.y - Mm(2.0), 0.25);
        cursor.y = cursor.y - Mm(6.0);
    }
}

fn draw_footer(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts, footer: &str) {
    cursor.ensure(doc, Mm(14.0));
    cursor.y = cursor.y - Mm(10.0);
    let layer = cursor.layer(doc);
    text(&layer, footer, 8.0, centered_x(footer, 8.0), cursor.y, &fonts.regular, black());
}

/// Stable per-report file identifier for the trailer `ID` array, 32 ASCII
/// bytes derived from the generation timestamp and report subject.
fn file_id(model: &ReportModel) -> Vec<u8> {
    let mut id = format!("{}-{}", model.generated_at.unix_timestamp(), model.subject);
    id.truncate(32);
    while id.len() < 32 {
        id.push('0');
    }
    id.into_bytes()
}

/// The writer seeds the trailer `ID` array with fresh randomness on every
/// save. Reload the emitted bytes and pin both entries to [`file_id`] so
/// identical inputs produce identical output.
fn pin_trailer_id(bytes: &[u8], model: &ReportModel) -> Result<Vec<u8>, AppError> {
    use printpdf::lopdf::{Document, Object, StringFormat};

    let id = file_id(model);
    let mut doc = Document::load_mem(bytes).map_err(pdf_err)?;
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.clone(), StringFormat::Literal),
            Object::String(id, StringFormat::Literal),
        ]),
    );
    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(pdf_err)?;
    Ok(out)
}

/// Render the model into a finished PDF byte stream. Metadata dates and the
/// trailer file identifier are pinned to the model so identical inputs
/// produce identical bytes.
pub fn render(model: &ReportModel, config: &ReportConfig) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) =
        PdfDocument::new(model.title.as_str(), PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let doc = doc
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_icc_profile: false,
            requires_xmp_metadata: false,
            ..Default::default()
        }))
        .with_creation_date(model.generated_at)
        .with_mod_date(model.generated_at);

    let fonts = Fonts {
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
    };

    let mut cursor = Cursor {
        page,
        layer,
        y: TOP_START,
    };

    draw_header(&doc, &mut cursor, &fonts, config);
    draw_title(&doc, &mut cursor, &fonts, model)?;

    match &model.body {
        ReportBody::Detail(sections) => {
            draw_section_heading(&doc, &mut cursor, &fonts, &model.summary_title);
            draw_kv_table(&doc, &mut cursor, &fonts, &model.summary, LEFT + Mm(50.8));
            for section in sections {
                draw_text_section(&doc, &mut cursor, &fonts, section);
            }
        }
        ReportBody::Table { rows, .. } => {
            draw_section_heading(&doc, &mut cursor, &fonts, "STATISTICS");
            draw_kv_table(&doc, &mut cursor, &fonts, &model.summary, LEFT + Mm(63.5));
            draw_section_heading(&doc, &mut cursor, &fonts, "INCIDENT LIST");
            draw_incident_table(&doc, &mut cursor, &fonts, rows);
        }
    }

    draw_footer(&doc, &mut cursor, &fonts, &config.footer);

    let mut writer = BufWriter::new(std::io::Cursor::new(Vec::new()));
    doc.save(&mut writer).map_err(pdf_err)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| pdf_err(e.to_string()))?
        .into_inner();
    pin_trailer_id(&bytes, model)
}
