use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;

/// Canonical equipment failure record consumed by the report engine.
///
/// Persistence, authentication and route dispatch live outside this crate;
/// callers hand over an ordered snapshot of records per export call. Optional
/// diagnosis fields stay `None` when the technician has not filled them in,
/// and reports substitute fixed placeholder text instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Incident {
    pub id: i64,
    pub equipment: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub cause: Option<String>,
    pub solution: Option<String>,
    pub observation: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Parse external text into a priority, rejecting anything outside the
    /// enum before rendering can start.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            "Critical" => Ok(Priority::Critical),
            other => Err(
                AppError::new("VALIDATION_UNKNOWN_PRIORITY", "Unknown incident priority")
                    .with_details(format!("value={other}")),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In progress",
            Status::Resolved => "Resolved",
            Status::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "Pending" => Ok(Status::Pending),
            "In progress" => Ok(Status::InProgress),
            "Resolved" => Ok(Status::Resolved),
            "Closed" => Ok(Status::Closed),
            other => Err(
                AppError::new("VALIDATION_UNKNOWN_STATUS", "Unknown incident status")
                    .with_details(format!("value={other}")),
            ),
        }
    }
}
