use time::macros::datetime;

use crate::domain::{Incident, Priority, Status};

/// Deterministic sample dataset, large enough to make history exports
/// meaningful. Covers every priority and status, a description past the
/// tabular truncation limit, and missing diagnosis fields.
pub fn demo_incidents() -> Vec<Incident> {
    vec![
        Incident {
            id: 1,
            equipment: "Compressor A1".to_string(),
            description: "Significant air leak at the main seal, pressure drops below the \
                          operating threshold within minutes"
                .to_string(),
            priority: Priority::High,
            status: Status::InProgress,
            created_at: datetime!(2025-01-15 09:30:00 UTC),
            cause: Some("Worn seal".to_string()),
            solution: Some("Seal replacement required".to_string()),
            observation: Some("Production stop required".to_string()),
            created_by: "admin".to_string(),
        },
        Incident {
            id: 2,
            equipment: "Conveyor B2".to_string(),
            description: "Abnormal noise and vibrations".to_string(),
            priority: Priority::Medium,
            status: Status::Pending,
            created_at: datetime!(2025-01-16 14:20:00 UTC),
            cause: Some("Worn bearing".to_string()),
            solution: None,
            observation: Some("Check the alignment".to_string()),
            created_by: "technician".to_string(),
        },
        Incident {
            id: 3,
            equipment: "Pump C3".to_string(),
            description: "Insufficient flow rate".to_string(),
            priority: Priority::Low,
            status: Status::Resolved,
            created_at: datetime!(2025-01-14 11:45:00 UTC),
            cause: Some("Clogged filter".to_string()),
            solution: Some("Filter cleaned".to_string()),
            observation: Some("Back to normal service".to_string()),
            created_by: "admin".to_string(),
        },
        Incident {
            id: 4,
            equipment: "Motor D4".to_string(),
            description: "Abnormal overheating".to_string(),
            priority: Priority::Critical,
            status: Status::InProgress,
            created_at: datetime!(2025-01-17 16:00:00 UTC),
            cause: Some("Blocked ventilation".to_string()),
            solution: Some("Cleaning in progress".to_string()),
            observation: Some("Temperature monitoring required".to_string()),
            created_by: "technician".to_string(),
        },
        Incident {
            id: 5,
            equipment: "Robot E5".to_string(),
            description: "Positioning error".to_string(),
            priority: Priority::Medium,
            status: Status::Resolved,
            created_at: datetime!(2025-01-13 08:15:00 UTC),
            cause: Some("Faulty sensor".to_string()),
            solution: Some("Sensor replaced".to_string()),
            observation: Some("Calibration done".to_string()),
            created_by: "admin".to_string(),
        },
        Incident {
            id: 6,
            equipment: "Desalination unit F6".to_string(),
            description: "Membrane fouling suspected, permeate conductivity rising".to_string(),
            priority: Priority::High,
            status: Status::Closed,
            created_at: datetime!(2025-01-10 07:00:00 UTC),
            cause: None,
            solution: None,
            observation: None,
            created_by: "technician".to_string(),
        },
    ]
}
