use crate::domain::Incident;
use crate::error::AppError;

fn require_text(record_id: i64, field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::new(
            "VALIDATION_MISSING_FIELD",
            format!("Required field {field} is empty"),
        )
        .with_details(format!("incident id={record_id}")));
    }
    Ok(())
}

/// Validate a single record before any rendering begins.
///
/// Enum fields cannot hold out-of-range values once a record exists (see
/// `Priority::parse` / `Status::parse` for the ingest boundary), so the
/// checks here cover identity and required text.
pub fn validate_record(incident: &Incident) -> Result<(), AppError> {
    if incident.id <= 0 {
        return Err(AppError::new(
            "VALIDATION_BAD_ID",
            "Incident id must be a positive integer",
        )
        .with_details(format!("id={}", incident.id)));
    }
    require_text(incident.id, "equipment", &incident.equipment)?;
    require_text(incident.id, "description", &incident.description)?;
    require_text(incident.id, "created_by", &incident.created_by)?;
    Ok(())
}

/// Fail fast on the first malformed record of a bulk export. An empty slice
/// is valid input (the history export then renders a header-only table).
pub fn validate_records(records: &[Incident]) -> Result<(), AppError> {
    for record in records {
        validate_record(record)?;
    }
    Ok(())
}
