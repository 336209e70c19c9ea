use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::domain::{Incident, Status};
use crate::error::AppError;
use crate::stats::compute_stats;
use crate::style::{priority_emphasis, status_emphasis, Emphasis};

/// Fixed column order for the tabular body. Both the header row and every
/// data row follow this order exactly.
pub const TABLE_COLUMNS: [&str; 10] = [
    "ID",
    "Equipment",
    "Description",
    "Priority",
    "Status",
    "Created at",
    "Created by",
    "Cause",
    "Solution",
    "Observations",
];

/// Tabular descriptions longer than this are cut and suffixed with `...`.
pub const DESCRIPTION_MAX_CHARS: usize = 50;

/// Placeholder for a missing cause or solution. Distinct from
/// [`PLACEHOLDER_NONE`]; the two must not be unified.
pub const PLACEHOLDER_NOT_SPECIFIED: &str = "Not specified";

/// Placeholder for a missing observation.
pub const PLACEHOLDER_NONE: &str = "None";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryPair {
    pub label: String,
    pub value: String,
    pub emphasis: Emphasis,
}

impl SummaryPair {
    fn new(label: &str, value: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            emphasis,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextSection {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableRow {
    /// Cell text in [`TABLE_COLUMNS`] order.
    pub cells: [String; 10],
    /// Kept alongside the rendered text so the spreadsheet can apply the
    /// status-driven row fill without re-parsing cell values.
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum ReportBody {
    Detail(Vec<TextSection>),
    Table { title: String, rows: Vec<TableRow> },
}

/// Format-neutral report representation, built fresh per export call and
/// consumed by exactly one renderer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportModel {
    /// Sheet name and filename stem: `History` or `Incident_{id}`.
    pub subject: String,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub summary_title: String,
    pub summary: Vec<SummaryPair>,
    pub body: ReportBody,
}

/// Char-boundary-safe truncation; returns the input verbatim when it fits.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

fn text_or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => placeholder,
    }
}

fn format_err(e: time::error::Format) -> AppError {
    AppError::new("TIME_FORMAT_FAILED", "Failed to format timestamp").with_details(e.to_string())
}

/// `YYYY-MM-DD HH:MM:SS`, the storage format the tracker has always shown.
pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, AppError> {
    ts.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .map_err(format_err)
}

/// `DD/MM/YYYY at HH:MM`, used by the generation caption in both formats.
pub fn format_caption(ts: OffsetDateTime) -> Result<String, AppError> {
    ts.format(format_description!(
        "[day]/[month]/[year] at [hour]:[minute]"
    ))
    .map_err(format_err)
}

/// Single-record report: six summary pairs in fixed order plus one titled
/// free-text section per diagnosis field.
pub fn build_detail_model(
    incident: &Incident,
    generated_at: OffsetDateTime,
) -> Result<ReportModel, AppError> {
    let created_at = format_timestamp(incident.created_at)?;

    let summary = vec![
        SummaryPair::new("ID:", format!("#{}", incident.id), Emphasis::Important),
        SummaryPair::new("Equipment:", incident.equipment.clone(), Emphasis::Normal),
        SummaryPair::new(
            "Priority:",
            incident.priority.label(),
            priority_emphasis(incident.priority),
        ),
        SummaryPair::new(
            "Status:",
            incident.status.label(),
            status_emphasis(incident.status),
        ),
        SummaryPair::new("Created at:", created_at, Emphasis::Normal),
        SummaryPair::new("Created by:", incident.created_by.clone(), Emphasis::Normal),
    ];

    let sections = vec![
        TextSection {
            title: "PROBLEM DESCRIPTION".to_string(),
            body: incident.description.clone(),
        },
        TextSection {
            title: "IDENTIFIED CAUSE".to_string(),
            body: text_or(&incident.cause, PLACEHOLDER_NOT_SPECIFIED).to_string(),
        },
        TextSection {
            title: "APPLIED SOLUTION".to_string(),
            body: text_or(&incident.solution, PLACEHOLDER_NOT_SPECIFIED).to_string(),
        },
        TextSection {
            title: "OBSERVATIONS".to_string(),
            body: text_or(&incident.observation, PLACEHOLDER_NONE).to_string(),
        },
    ];

    Ok(ReportModel {
        subject: format!("Incident_{}", incident.id),
        title: format!("DETAILED REPORT - INCIDENT #{}", incident.id),
        generated_at,
        summary_title: "GENERAL INFORMATION".to_string(),
        summary,
        body: ReportBody::Detail(sections),
    })
}

fn table_row(incident: &Incident) -> Result<TableRow, AppError> {
    let cells = [
        format!("#{}", incident.id),
        incident.equipment.clone(),
        truncate_chars(&incident.description, DESCRIPTION_MAX_CHARS),
        incident.priority.label().to_string(),
        incident.status.label().to_string(),
        format_timestamp(incident.created_at)?,
        incident.created_by.clone(),
        text_or(&incident.cause, PLACEHOLDER_NOT_SPECIFIED).to_string(),
        text_or(&incident.solution, PLACEHOLDER_NOT_SPECIFIED).to_string(),
        text_or(&incident.observation, PLACEHOLDER_NONE).to_string(),
    ];
    Ok(TableRow {
        cells,
        status: incident.status,
    })
}

/// Multi-record report: dashboard summary pairs plus one table row per
/// incident in caller order. Only the description is truncated here; the
/// document renderer applies its own, narrower table limits.
pub fn build_tabular_model(
    records: &[Incident],
    generated_at: OffsetDateTime,
) -> Result<ReportModel, AppError> {
    let stats = compute_stats(records);

    let summary = vec![
        SummaryPair::new("Total incidents:", stats.total.to_string(), Emphasis::Important),
        SummaryPair::new("Pending:", stats.pending.to_string(), Emphasis::Normal),
        SummaryPair::new("In progress:", stats.in_progress.to_string(), Emphasis::Normal),
        SummaryPair::new(
            "Resolved:",
            stats.resolved.to_string(),
            Emphasis::StatusResolved,
        ),
        SummaryPair::new(
            "Resolution rate:",
            format!("{:.1}%", stats.resolution_rate),
            Emphasis::Important,
        ),
    ];

    let rows = records
        .iter()
        .map(table_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReportModel {
        subject: "History".to_string(),
        title: "COMPLETE INCIDENT HISTORY".to_string(),
        generated_at,
        summary_title: "DASHBOARD".to_string(),
        summary,
        body: ReportBody::Table {
            title: "INCIDENT DETAILS".to_string(),
            rows,
        },
    })
}
