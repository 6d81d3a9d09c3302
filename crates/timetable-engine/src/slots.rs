//! The canonical slot grid: the ascending list of bookable start times.
//!
//! Times are zero-padded `HH:MM` strings, so lexicographic order equals
//! chronological order and comparisons stay on `&str`.

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::error::{Result, TimetableError};
use crate::model::{ScheduleItem, Weekday};

/// Start times used by the dashboard grid.
pub const DEFAULT_TIME_SLOTS: [&str; 10] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

/// Bookable start times and school days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    times: Vec<String>,
    days: Vec<Weekday>,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            times: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
            days: Weekday::ALL.to_vec(),
        }
    }
}

impl SlotGrid {
    /// Build a grid, checking that every time is `HH:MM` and that times are
    /// strictly ascending.
    ///
    /// # Errors
    /// Returns `TimetableError::InvalidTime` for a malformed time and
    /// `TimetableError::InvalidGrid` for unordered times or an empty day list.
    pub fn new(times: Vec<String>, days: Vec<Weekday>) -> Result<Self> {
        for time in &times {
            parse_hhmm(time)?;
        }
        if let Some(pair) = times.windows(2).find(|w| w[0] >= w[1]) {
            return Err(TimetableError::InvalidGrid(format!(
                "time slots must be strictly ascending ('{}' is followed by '{}')",
                pair[0], pair[1]
            )));
        }
        if days.is_empty() {
            return Err(TimetableError::InvalidGrid("no school days".to_string()));
        }
        Ok(Self { times, days })
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn has_day(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// First grid slot strictly later than `start_time` that is not in `occupied`.
    pub fn next_free_after(&self, start_time: &str, occupied: &HashSet<&str>) -> Option<&str> {
        self.times
            .iter()
            .map(String::as_str)
            .find(|slot| *slot > start_time && !occupied.contains(slot))
    }

    /// Every grid slot not in `occupied`, in grid order.
    pub fn free_slots<'a>(&'a self, occupied: &HashSet<&str>) -> Vec<&'a str> {
        self.times
            .iter()
            .map(String::as_str)
            .filter(|slot| !occupied.contains(slot))
            .collect()
    }
}

/// Start times `teacher` already holds on `day`, across the whole schedule.
pub fn teacher_occupied<'a>(
    schedule: &'a [ScheduleItem],
    teacher: &str,
    day: Weekday,
) -> HashSet<&'a str> {
    schedule
        .iter()
        .filter(|i| i.teacher == teacher && i.day == day)
        .map(|i| i.start_time.as_str())
        .collect()
}

/// Parse a zero-padded `HH:MM` wall-clock time.
///
/// chrono accepts `9:00` for `%H`, so the length check keeps the
/// string-ordering guarantee intact.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    if value.len() != 5 {
        return Err(TimetableError::InvalidTime(value.to_string()));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| TimetableError::InvalidTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hhmm_requires_zero_padding() {
        assert!(parse_hhmm("09:00").is_ok());
        assert!(parse_hhmm("9:00").is_err());
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("").is_err());
    }

    #[test]
    fn new_rejects_unordered_times() {
        let err = SlotGrid::new(
            vec!["09:00".into(), "08:00".into()],
            Weekday::ALL.to_vec(),
        )
        .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidGrid(_)));
    }

    #[test]
    fn teacher_occupied_is_per_teacher_and_day() {
        let class = |teacher: &str, day: Weekday, start: &str| ScheduleItem {
            id: format!("{teacher}-{start}"),
            subject: "Art".to_string(),
            teacher: teacher.to_string(),
            student_group: "9A".to_string(),
            room_id: "r1".to_string(),
            day,
            start_time: start.to_string(),
            end_time: "18:00".to_string(),
            color: String::new(),
        };
        let schedule = [
            class("Reed", Weekday::Monday, "09:00"),
            class("Reed", Weekday::Monday, "11:00"),
            class("Reed", Weekday::Tuesday, "10:00"),
            class("Vega", Weekday::Monday, "10:00"),
        ];

        let occupied = teacher_occupied(&schedule, "Reed", Weekday::Monday);

        assert_eq!(occupied, HashSet::from(["09:00", "11:00"]));
        assert_eq!(SlotGrid::default().next_free_after("09:00", &occupied), Some("10:00"));
    }

    #[test]
    fn new_rejects_empty_days() {
        let err = SlotGrid::new(vec!["09:00".into()], vec![]).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidGrid(_)));
    }
}
