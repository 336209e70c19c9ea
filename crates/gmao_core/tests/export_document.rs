use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use time::macros::datetime;

use gmao_core::demo::demo_incidents;
use gmao_core::domain::{Incident, Priority, Status};
use gmao_core::model::TableRow;
use gmao_core::report::document::table_cells;
use gmao_core::report::{
    export_history_document, export_incident_document, ReportConfig, DOCUMENT_MIME,
};

const GENERATED_AT: time::OffsetDateTime = datetime!(2025-02-01 12:00:00 UTC);

/// 1x1 RGB PNG.
const TINY_PNG: [u8; 69] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
    0xCF, 0xC0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0xC9, 0xFE, 0x92, 0xEF, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn config_without_logo() -> ReportConfig {
    ReportConfig {
        logo_path: None,
        ..ReportConfig::default()
    }
}

/// Page text as rendered, decoded from the emitted bytes. Content streams
/// are hex-encoded and may be compressed, so raw byte searches see nothing.
fn extracted_text(bytes: &[u8]) -> String {
    let doc = printpdf::lopdf::Document::load_mem(bytes).expect("parse rendered document");
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).expect("extract page text")
}

#[test]
fn history_export_produces_a_pdf() {
    let records = demo_incidents();
    let export =
        export_history_document(&records, &config_without_logo(), GENERATED_AT).expect("export");

    assert_eq!(export.filename, "History_20250201_120000.pdf");
    assert_eq!(export.content_type, DOCUMENT_MIME);
    assert_eq!(&export.bytes[..5], b"%PDF-");
}

#[test]
fn incident_export_embeds_the_record_id_in_the_filename() {
    let record = demo_incidents().remove(0);
    let export =
        export_incident_document(&record, &config_without_logo(), GENERATED_AT).expect("export");
    assert_eq!(export.filename, "Incident_1_20250201_120000.pdf");
    assert_eq!(&export.bytes[..5], b"%PDF-");
}

#[test]
fn rendering_twice_with_a_fixed_timestamp_is_byte_identical() {
    let records = demo_incidents();
    let config = config_without_logo();
    let first = export_history_document(&records, &config, GENERATED_AT).expect("first");
    let second = export_history_document(&records, &config, GENERATED_AT).expect("second");
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn long_equipment_names_are_cut_in_the_incident_table() {
    let record = Incident {
        id: 9,
        equipment: "ABCDEFGHIJKLMNOPQRSTUVWXY".to_string(),
        description: "Bearing temperature alarm".to_string(),
        priority: Priority::Low,
        status: Status::Pending,
        created_at: datetime!(2025-01-20 10:00:00 UTC),
        cause: None,
        solution: None,
        observation: None,
        created_by: "maintenance-lead".to_string(),
    };
    let export =
        export_history_document(&[record], &config_without_logo(), GENERATED_AT).expect("export");

    let text = extracted_text(&export.bytes);
    assert!(text.contains("ABCDEFGHIJKLMNOPQRST..."));
    assert!(!text.contains("ABCDEFGHIJKLMNOPQRSTU"));
    // Author column is cut at ten chars, timestamps render date-only.
    assert!(text.contains("maintenanc..."));
    assert!(text.contains("2025-01-20"));
    assert!(!text.contains("2025-01-20 10:00:00"));
}

#[test]
fn table_projection_truncates_and_drops_time_of_day() {
    let row = TableRow {
        cells: [
            "#9".to_string(),
            "ABCDEFGHIJKLMNOPQRSTUVWXY".to_string(),
            "Bearing temperature alarm".to_string(),
            "Low".to_string(),
            "Pending".to_string(),
            "2025-01-20 10:00:00".to_string(),
            "maintenance-lead".to_string(),
            "Not specified".to_string(),
            "Not specified".to_string(),
            "None".to_string(),
        ],
        status: Status::Pending,
    };
    let cells = table_cells(&row);
    assert_eq!(
        cells,
        [
            "#9".to_string(),
            "ABCDEFGHIJKLMNOPQRST...".to_string(),
            "Low".to_string(),
            "Pending".to_string(),
            "2025-01-20".to_string(),
            "maintenanc...".to_string(),
        ]
    );
}

#[test]
fn empty_history_export_succeeds() {
    let export =
        export_history_document(&[], &config_without_logo(), GENERATED_AT).expect("export");
    assert_eq!(&export.bytes[..5], b"%PDF-");
}

#[test]
fn missing_logo_asset_falls_back_to_text_header() {
    let config = ReportConfig {
        logo_path: Some(PathBuf::from("does/not/exist/logo.png")),
        ..ReportConfig::default()
    };
    let records = demo_incidents();
    let export = export_history_document(&records, &config, GENERATED_AT).expect("export");
    assert_eq!(&export.bytes[..5], b"%PDF-");
    assert!(extracted_text(&export.bytes).contains("ONEE-BO"));
}

#[test]
fn present_logo_asset_is_embedded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logo_path = dir.path().join("logo.png");
    std::fs::File::create(&logo_path)
        .and_then(|mut f| f.write_all(&TINY_PNG))
        .expect("write logo");

    let config = ReportConfig {
        logo_path: Some(logo_path),
        ..ReportConfig::default()
    };
    let record = demo_incidents().remove(0);
    let with_logo = export_incident_document(&record, &config, GENERATED_AT).expect("with logo");
    let plain =
        export_incident_document(&record, &config_without_logo(), GENERATED_AT).expect("plain");

    assert_eq!(&with_logo.bytes[..5], b"%PDF-");
    assert!(with_logo.bytes.len() > plain.bytes.len());
}

#[test]
fn detail_export_renders_placeholders_for_missing_fields() {
    let mut record = demo_incidents().remove(0);
    record.cause = None;
    record.observation = None;
    let export =
        export_incident_document(&record, &config_without_logo(), GENERATED_AT).expect("export");

    let text = extracted_text(&export.bytes);
    assert!(text.contains("IDENTIFIED CAUSE"));
    assert!(text.contains("Not specified"));
}
