//! Error types for timetable-engine operations.
//!
//! Conflict detection itself never fails; these errors come from parsing
//! weekdays and times, building a slot grid, or rejecting a schedule that
//! breaks the data-model invariants.

use thiserror::Error;

use crate::validate::ValidationIssue;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid day: {0}")]
    InvalidDay(String),

    #[error("Invalid time (expected zero-padded HH:MM): {0}")]
    InvalidTime(String),

    #[error("Invalid slot grid: {0}")]
    InvalidGrid(String),

    #[error("{} validation issue(s): {}", .0.len(), first_issue(.0))]
    InvalidSchedule(Vec<ValidationIssue>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn first_issue(issues: &[ValidationIssue]) -> String {
    issues
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, TimetableError>;
