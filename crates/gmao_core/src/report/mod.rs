pub mod document;
pub mod spreadsheet;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::domain::Incident;
use crate::error::AppError;
use crate::model::{build_detail_model, build_tabular_model};
use crate::validate::{validate_record, validate_records};

pub const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DOCUMENT_MIME: &str = "application/pdf";

/// Fixed branding for report headers and footers, plus the on-disk logo
/// asset. The logo is the only shared resource of the pipeline; it is read,
/// never mutated, and its absence is non-fatal in both renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    pub company_name: String,
    pub company_subtitle: String,
    pub footer: String,
    pub logo_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            company_name: "ONEE-BO".to_string(),
            company_subtitle: "Equipment failure management".to_string(),
            footer: "ONEE-BO - Equipment Failure Management".to_string(),
            logo_path: Some(PathBuf::from("static/images/logo.png")),
        }
    }
}

/// One finished export: the rendered byte stream plus the suggested
/// download name and content type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

fn filename_timestamp(generated_at: OffsetDateTime) -> Result<String, AppError> {
    generated_at
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .map_err(|e| {
            AppError::new("TIME_FORMAT_FAILED", "Failed to format filename timestamp")
                .with_details(e.to_string())
        })
}

/// Styled workbook covering the full history. An empty slice is valid and
/// yields a header-only table with zeroed statistics.
pub fn export_history_spreadsheet(
    records: &[Incident],
    config: &ReportConfig,
    generated_at: OffsetDateTime,
) -> Result<ExportFile, AppError> {
    validate_records(records)?;
    let model = build_tabular_model(records, generated_at)?;
    let bytes = spreadsheet::render(&model, config)?;
    Ok(ExportFile {
        filename: format!("{}_{}.xlsx", model.subject, filename_timestamp(generated_at)?),
        bytes,
        content_type: SPREADSHEET_MIME,
    })
}

/// Paginated document covering the full history.
pub fn export_history_document(
    records: &[Incident],
    config: &ReportConfig,
    generated_at: OffsetDateTime,
) -> Result<ExportFile, AppError> {
    validate_records(records)?;
    let model = build_tabular_model(records, generated_at)?;
    let bytes = document::render(&model, config)?;
    Ok(ExportFile {
        filename: format!("{}_{}.pdf", model.subject, filename_timestamp(generated_at)?),
        bytes,
        content_type: DOCUMENT_MIME,
    })
}

/// Styled workbook for a single incident.
pub fn export_incident_spreadsheet(
    record: &Incident,
    config: &ReportConfig,
    generated_at: OffsetDateTime,
) -> Result<ExportFile, AppError> {
    validate_record(record)?;
    let model = build_detail_model(record, generated_at)?;
    let bytes = spreadsheet::render(&model, config)?;
    Ok(ExportFile {
        filename: format!("{}_{}.xlsx", model.subject, filename_timestamp(generated_at)?),
        bytes,
        content_type: SPREADSHEET_MIME,
    })
}

/// Paginated document for a single incident.
pub fn export_incident_document(
    record: &Incident,
    config: &ReportConfig,
    generated_at: OffsetDateTime,
) -> Result<ExportFile, AppError> {
    validate_record(record)?;
    let model = build_detail_model(record, generated_at)?;
    let bytes = document::render(&model, config)?;
    Ok(ExportFile {
        filename: format!("{}_{}.pdf", model.subject, filename_timestamp(generated_at)?),
        bytes,
        content_type: DOCUMENT_MIME,
    })
}
