use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Status};

/// Named visual treatment shared by both renderers.
///
/// The mapping from domain state to emphasis is decided here once; each
/// renderer decides how lavishly to apply it (the document format restricts
/// itself to two colors and ignores most categories).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Normal,
    Important,
    PriorityHigh,
    PriorityMedium,
    StatusResolved,
}

pub fn priority_emphasis(priority: Priority) -> Emphasis {
    match priority {
        Priority::High => Emphasis::PriorityHigh,
        Priority::Medium => Emphasis::PriorityMedium,
        // The legacy styling table never defined a critical treatment;
        // reports must keep matching it, so Critical renders unstyled.
        Priority::Low | Priority::Critical => Emphasis::Normal,
    }
}

pub fn status_emphasis(status: Status) -> Emphasis {
    match status {
        Status::Resolved => Emphasis::StatusResolved,
        _ => Emphasis::Normal,
    }
}

/// Immutable spreadsheet palette, `0xRRGGBB`. An explicit table passed into
/// the renderer replaces the old mutable named-style registry.
pub mod palette {
    pub const FILL_RESOLVED: u32 = 0xD1FAE5;
    pub const FILL_IN_PROGRESS: u32 = 0xDBEAFE;
    pub const FILL_PENDING: u32 = 0xFEF3C7;
    pub const FILL_PLAIN: u32 = 0xFFFFFF;
}

/// Row background for the tabular spreadsheet body. The document renderer
/// never uses fills (two-color rule), so the concrete values live with the
/// spreadsheet palette.
pub fn status_fill(status: Status) -> u32 {
    match status {
        Status::Resolved => palette::FILL_RESOLVED,
        Status::InProgress => palette::FILL_IN_PROGRESS,
        Status::Pending => palette::FILL_PENDING,
        Status::Closed => palette::FILL_PLAIN,
    }
}
