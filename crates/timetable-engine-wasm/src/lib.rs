//! WASM bindings for timetable-engine.
//!
//! Exposes conflict detection, schedule validation, and the teacher free-slot
//! lookup to the browser dashboard via `wasm-bindgen`. Schedules, resources and
//! results cross the boundary as JSON strings in the dashboard's camelCase shape.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timetable-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/timetable_engine_wasm.wasm
//! ```

use serde::de::DeserializeOwned;
use timetable_engine::{teacher_occupied, Resource, ScheduleItem, SlotGrid, Weekday};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_inputs(
    schedule_json: &str,
    resources_json: &str,
) -> Result<(Vec<ScheduleItem>, Vec<Resource>), JsValue> {
    let schedule = parse_json(schedule_json, "schedule")?;
    let resources = parse_json(resources_json, "resources")?;
    Ok((schedule, resources))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Detect every teacher, room and student-group double-booking.
///
/// `schedule_json` is an array of schedule items and `resources_json` an array
/// of resources. Returns a JSON array of `{itemId, kind, message, suggestions}`.
#[wasm_bindgen(js_name = "detectConflicts")]
pub fn detect_conflicts(schedule_json: &str, resources_json: &str) -> Result<String, JsValue> {
    let (schedule, resources) = parse_inputs(schedule_json, resources_json)?;
    to_json(&timetable_engine::detect_conflicts(&schedule, &resources))
}

/// Check a schedule draft against the data-model invariants.
///
/// Returns a JSON array of human-readable issue strings; empty when valid.
#[wasm_bindgen(js_name = "validateSchedule")]
pub fn validate_schedule(schedule_json: &str, resources_json: &str) -> Result<String, JsValue> {
    let (schedule, resources) = parse_inputs(schedule_json, resources_json)?;

    let mut issues = timetable_engine::validate_resources(&resources);
    issues.extend(timetable_engine::validate_schedule(&schedule, &resources));

    let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
    to_json(&messages)
}

/// First default-grid slot after `start_time` on `day` where `teacher` is free.
///
/// Returns `undefined` when the rest of the day is fully booked.
#[wasm_bindgen(js_name = "nextFreeSlot")]
pub fn next_free_slot(
    schedule_json: &str,
    teacher: &str,
    day: &str,
    start_time: &str,
) -> Result<Option<String>, JsValue> {
    let schedule: Vec<ScheduleItem> = parse_json(schedule_json, "schedule")?;
    let day: Weekday = day.parse().map_err(|e| JsValue::from_str(&format!("{}", e)))?;

    let occupied = teacher_occupied(&schedule, teacher, day);

    Ok(SlotGrid::default()
        .next_free_after(start_time, &occupied)
        .map(str::to_string))
}
