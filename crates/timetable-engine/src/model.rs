//! Timetable entities: placed classes, bookable resources, and conflict records.
//!
//! JSON field names follow the dashboard's camelCase shape (`studentGroup`,
//! `roomId`, `startTime`, ...) so schedules can be exchanged with it unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// A school day. The timetable covers a fixed Monday–Friday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All school days in week order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = TimetableError;

    /// Parse a day name case-insensitively ("monday", "Monday", "MONDAY").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimetableError::InvalidDay(s.to_string()))
    }
}

/// One placed class occurrence in the weekly timetable.
///
/// Every text field defaults to empty when absent from JSON, so one
/// incomplete item never rejects a whole schedule. Only `day` is required.
/// [`validate_schedule`](crate::validate_schedule) reports the gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub student_group: String,
    /// References a [`Resource`] of kind [`ResourceKind::Room`].
    #[serde(default)]
    pub room_id: String,
    pub day: Weekday,
    /// Zero-padded `HH:MM`. Together with `day` this is the slot key.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    /// Presentation only.
    #[serde(default)]
    pub color: String,
}

/// A class to be added to a [`ScheduleStore`](crate::ScheduleStore), which
/// assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleItem {
    pub subject: String,
    pub teacher: String,
    pub student_group: String,
    pub room_id: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub color: String,
}

impl NewScheduleItem {
    pub fn with_id(self, id: String) -> ScheduleItem {
        ScheduleItem {
            id,
            subject: self.subject,
            teacher: self.teacher,
            student_group: self.student_group,
            room_id: self.room_id,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color,
        }
    }
}

/// Discriminator for [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Room,
    Equipment,
    StudentGroup,
}

/// A bookable or taggable school resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Seats; only meaningful for rooms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl Resource {
    pub fn room(id: &str, name: &str, capacity: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: ResourceKind::Room,
            capacity,
        }
    }

    pub fn is_room(&self) -> bool {
        self.kind == ResourceKind::Room
    }

    /// The declared capacity, treating `0` as undeclared.
    pub fn declared_capacity(&self) -> Option<u32> {
        self.capacity.filter(|&c| c > 0)
    }
}

/// Which contended dimension produced a [`Conflict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    Teacher,
    Room,
    StudentGroup,
}

/// A double-booking attached to one schedule item.
///
/// Derived and transient: recomputed from scratch on every detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub item_id: String,
    pub kind: ConflictKind,
    pub message: String,
    /// Remediation hints, best first. May be empty.
    #[serde(default)]
    pub suggestions: Vec<String>,
}
