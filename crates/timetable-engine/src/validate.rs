//! Invariant checks for schedules produced outside the engine.
//!
//! Conflict detection trusts its input and never calls these. They exist for
//! the boundary where a draft arrives from an external producer and should be
//! rejected before it replaces the current timetable.

use std::collections::HashSet;
use std::fmt;

use crate::model::{Resource, ScheduleItem};
use crate::slots::parse_hhmm;

/// One broken invariant in a schedule or resource list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    DuplicateId { id: String },
    MissingField { item_id: String, field: &'static str },
    InvalidTime { item_id: String, value: String },
    EndBeforeStart { item_id: String, start: String, end: String },
    UnknownRoom { item_id: String, room_id: String },
    DuplicateResourceId { id: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DuplicateId { id } => write!(f, "duplicate schedule item id '{id}'"),
            ValidationIssue::MissingField { item_id, field } => {
                write!(f, "item '{item_id}': {field} is missing or empty")
            }
            ValidationIssue::InvalidTime { item_id, value } => {
                write!(f, "item '{item_id}': '{value}' is not a zero-padded HH:MM time")
            }
            ValidationIssue::EndBeforeStart { item_id, start, end } => {
                write!(f, "item '{item_id}': end time {end} is not after start time {start}")
            }
            ValidationIssue::UnknownRoom { item_id, room_id } => {
                write!(f, "item '{item_id}': room '{room_id}' is not a known room")
            }
            ValidationIssue::DuplicateResourceId { id } => write!(f, "duplicate resource id '{id}'"),
        }
    }
}

/// Check a schedule against the data-model invariants.
///
/// Issues are reported in item order. Empty text fields (the JSON default for
/// a missing field) and empty times are reported; the unknown-room check only
/// applies when `resources` declares at least one room.
pub fn validate_schedule(schedule: &[ScheduleItem], resources: &[Resource]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();

    let rooms: HashSet<&str> = resources
        .iter()
        .filter(|r| r.is_room())
        .map(|r| r.id.as_str())
        .collect();

    for item in schedule {
        if !seen_ids.insert(item.id.as_str()) {
            issues.push(ValidationIssue::DuplicateId { id: item.id.clone() });
        }

        for (field, value) in [
            ("id", &item.id),
            ("subject", &item.subject),
            ("teacher", &item.teacher),
            ("studentGroup", &item.student_group),
            ("roomId", &item.room_id),
        ] {
            if value.trim().is_empty() {
                issues.push(ValidationIssue::MissingField { item_id: item.id.clone(), field });
            }
        }

        let start_ok = check_time(item, &item.start_time, &mut issues);
        let end_ok = check_time(item, &item.end_time, &mut issues);
        if start_ok && end_ok && item.start_time >= item.end_time {
            issues.push(ValidationIssue::EndBeforeStart {
                item_id: item.id.clone(),
                start: item.start_time.clone(),
                end: item.end_time.clone(),
            });
        }

        if !rooms.is_empty()
            && !item.room_id.trim().is_empty()
            && !rooms.contains(item.room_id.as_str())
        {
            issues.push(ValidationIssue::UnknownRoom {
                item_id: item.id.clone(),
                room_id: item.room_id.clone(),
            });
        }
    }

    issues
}

/// Check that resource ids are unique across all kinds.
pub fn validate_resources(resources: &[Resource]) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    resources
        .iter()
        .filter(|r| !seen.insert(r.id.as_str()))
        .map(|r| ValidationIssue::DuplicateResourceId { id: r.id.clone() })
        .collect()
}

fn check_time(item: &ScheduleItem, value: &str, issues: &mut Vec<ValidationIssue>) -> bool {
    if parse_hhmm(value).is_ok() {
        return true;
    }
    issues.push(ValidationIssue::InvalidTime {
        item_id: item.id.clone(),
        value: value.to_string(),
    });
    false
}
