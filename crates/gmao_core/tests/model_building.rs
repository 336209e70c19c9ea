use pretty_assertions::assert_eq;
use time::macros::datetime;

use gmao_core::domain::{Incident, Priority, Status};
use gmao_core::model::{
    build_detail_model, build_tabular_model, truncate_chars, ReportBody, DESCRIPTION_MAX_CHARS,
    PLACEHOLDER_NONE, PLACEHOLDER_NOT_SPECIFIED, TABLE_COLUMNS,
};
use gmao_core::style::Emphasis;

const GENERATED_AT: time::OffsetDateTime = datetime!(2025-02-01 12:00:00 UTC);

fn incident() -> Incident {
    Incident {
        id: 42,
        equipment: "Compressor A1".to_string(),
        description: "Air leak at the main seal".to_string(),
        priority: Priority::High,
        status: Status::Resolved,
        created_at: datetime!(2025-01-15 09:30:00 UTC),
        cause: Some("Worn seal".to_string()),
        solution: Some("Seal replaced".to_string()),
        observation: Some("Monitored".to_string()),
        created_by: "admin".to_string(),
    }
}

#[test]
fn detail_summary_pairs_keep_fixed_order_and_emphasis() {
    let model = build_detail_model(&incident(), GENERATED_AT).expect("model");

    let labels: Vec<&str> = model.summary.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["ID:", "Equipment:", "Priority:", "Status:", "Created at:", "Created by:"]
    );

    assert_eq!(model.summary[0].value, "#42");
    assert_eq!(model.summary[0].emphasis, Emphasis::Important);
    assert_eq!(model.summary[2].emphasis, Emphasis::PriorityHigh);
    assert_eq!(model.summary[3].emphasis, Emphasis::StatusResolved);
    assert_eq!(model.summary[4].value, "2025-01-15 09:30:00");

    assert_eq!(model.subject, "Incident_42");
    assert_eq!(model.title, "DETAILED REPORT - INCIDENT #42");
}

#[test]
fn critical_priority_renders_unstyled() {
    let mut record = incident();
    record.priority = Priority::Critical;
    record.status = Status::Pending;
    let model = build_detail_model(&record, GENERATED_AT).expect("model");
    assert_eq!(model.summary[2].emphasis, Emphasis::Normal);
    assert_eq!(model.summary[3].emphasis, Emphasis::Normal);
}

#[test]
fn missing_optional_fields_use_distinct_placeholders() {
    let mut record = incident();
    record.cause = None;
    record.solution = Some("".to_string());
    record.observation = None;
    let model = build_detail_model(&record, GENERATED_AT).expect("model");

    let ReportBody::Detail(sections) = &model.body else {
        panic!("detail model must carry text sections");
    };
    assert_eq!(sections[1].title, "IDENTIFIED CAUSE");
    assert_eq!(sections[1].body, PLACEHOLDER_NOT_SPECIFIED);
    assert_eq!(sections[2].body, PLACEHOLDER_NOT_SPECIFIED);
    assert_eq!(sections[3].title, "OBSERVATIONS");
    assert_eq!(sections[3].body, PLACEHOLDER_NONE);
}

#[test]
fn tabular_rows_follow_the_fixed_column_order() {
    assert_eq!(
        TABLE_COLUMNS,
        [
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
        ]
    );

    let mut record = incident();
    record.cause = None;
    let model = build_tabular_model(&[record], GENERATED_AT).expect("model");
    let ReportBody::Table { rows, .. } = &model.body else {
        panic!("tabular model must carry rows");
    };
    assert_eq!(rows[0].cells[0], "#42");
    assert_eq!(rows[0].cells[1], "Compressor A1");
    assert_eq!(rows[0].cells[4], "Resolved");
    assert_eq!(rows[0].cells[7], PLACEHOLDER_NOT_SPECIFIED);
    assert_eq!(rows[0].status, Status::Resolved);
}

#[test]
fn tabular_summary_shows_one_decimal_rate() {
    let records = vec![
        incident(),
        {
            let mut r = incident();
            r.id = 43;
            r.status = Status::Pending;
            r
        },
        {
            let mut r = incident();
            r.id = 44;
            r.status = Status::InProgress;
            r
        },
    ];
    let model = build_tabular_model(&records, GENERATED_AT).expect("model");

    let labels: Vec<&str> = model.summary.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Total incidents:",
            "Pending:",
            "In progress:",
            "Resolved:",
            "Resolution rate:",
        ]
    );
    assert_eq!(model.summary[3].emphasis, Emphasis::StatusResolved);
    assert_eq!(model.summary[4].value, "33.3%");
    assert_eq!(model.subject, "History");
}

#[test]
fn long_descriptions_are_cut_at_fifty_chars_in_the_table() {
    let long = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
    let mut record = incident();
    record.description = long.clone();
    let model = build_tabular_model(&[record], GENERATED_AT).expect("model");
    let ReportBody::Table { rows, .. } = &model.body else {
        panic!("tabular model must carry rows");
    };
    assert_eq!(rows[0].cells[2], format!("{}...", "x".repeat(50)));

    let exact = "y".repeat(DESCRIPTION_MAX_CHARS);
    let mut record = incident();
    record.description = exact.clone();
    let model = build_tabular_model(&[record], GENERATED_AT).expect("model");
    let ReportBody::Table { rows, .. } = &model.body else {
        panic!("tabular model must carry rows");
    };
    assert_eq!(rows[0].cells[2], exact);
}

#[test]
fn truncation_respects_char_boundaries() {
    let accented = "é".repeat(60);
    let cut = truncate_chars(&accented, 50);
    assert_eq!(cut, format!("{}...", "é".repeat(50)));
    assert_eq!(truncate_chars("short", 50), "short");

    // The document table truncates harder.
    let equipment = "ABCDEFGHIJKLMNOPQRSTUVWXY";
    assert_eq!(equipment.chars().count(), 25);
    assert_eq!(truncate_chars(equipment, 20), "ABCDEFGHIJKLMNOPQRST...");
}
