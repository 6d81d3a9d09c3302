//! # timetable-engine
//!
//! Deterministic double-booking detection for weekly school timetables.
//!
//! Given the placed classes of a week and the school's resources (rooms,
//! equipment, student groups), the engine finds every slot where a teacher,
//! a room, or a student group is booked twice, and attaches remediation hints:
//! a later free slot for the teacher, or an unbooked room that is at least as
//! large as the contested one.
//!
//! ## Quick start
//!
//! ```rust
//! use timetable_engine::{detect_conflicts, Resource, ScheduleItem, Weekday};
//!
//! let item = |id: &str, teacher: &str, room: &str| ScheduleItem {
//!     id: id.to_string(),
//!     subject: "Chemistry".to_string(),
//!     teacher: teacher.to_string(),
//!     student_group: id.to_string(),
//!     room_id: room.to_string(),
//!     day: Weekday::Monday,
//!     start_time: "09:00".to_string(),
//!     end_time: "10:00".to_string(),
//!     color: String::new(),
//! };
//! let schedule = vec![item("a", "Reed", "lab"), item("b", "Reed", "r2")];
//! let resources = vec![Resource::room("lab", "Science Lab", Some(24))];
//!
//! let conflicts = detect_conflicts(&schedule, &resources);
//! assert_eq!(conflicts.len(), 2);
//! assert_eq!(conflicts[0].message, "Teacher Reed is double-booked with 'Chemistry' and 'Chemistry'.");
//! ```
//!
//! ## Modules
//!
//! - [`model`] — `ScheduleItem`, `Resource`, `Conflict` and the weekday enum
//! - [`slots`] — The canonical slot grid and next-free-slot lookup
//! - [`conflict`] — Detect teacher/room/group double-bookings per slot
//! - [`store`] — Schedule holder that recomputes conflicts on every change
//! - [`validate`] — Invariant checks for externally produced schedules
//! - [`config`] — Slot grid configuration loaded from JSON
//! - [`error`] — Error types

pub mod config;
pub mod conflict;
pub mod error;
pub mod model;
pub mod slots;
pub mod store;
pub mod validate;

pub use config::EngineConfig;
pub use conflict::{
    conflicting_item_ids, conflicts_for, detect_conflicts, detect_conflicts_with_grid,
};
pub use error::TimetableError;
pub use model::{Conflict, ConflictKind, NewScheduleItem, Resource, ResourceKind, ScheduleItem, Weekday};
pub use slots::{teacher_occupied, SlotGrid};
pub use store::{ScheduleStore, SubscriptionId};
pub use validate::{validate_resources, validate_schedule, ValidationIssue};
