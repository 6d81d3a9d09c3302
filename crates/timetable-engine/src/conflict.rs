//! Detect double-booked teachers, rooms, and student groups in a weekly timetable.
//!
//! Items are bucketed by slot `(day, start_time)`. Within each bucket of two or
//! more items, three independent checks run in a fixed order: teacher, room,
//! student group. Every member of a cluster receives its own [`Conflict`], so
//! one item may appear once per violated dimension.
//!
//! Only exact start-time equality collides. Two classes whose intervals
//! overlap but start at different times are NOT conflicts.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::{debug, trace};

use crate::model::{Conflict, ConflictKind, Resource, ScheduleItem, Weekday};
use crate::slots::{teacher_occupied, SlotGrid};

/// Maximum number of alternative rooms named in a room suggestion.
const MAX_ROOM_SUGGESTIONS: usize = 3;

const NO_ROOM_AVAILABLE: &str =
    "No suitable alternative rooms available at this time. Consider rescheduling one class.";

/// Find every double-booking in `schedule`, using the default slot grid for
/// teacher suggestions.
///
/// See [`detect_conflicts_with_grid`].
pub fn detect_conflicts(schedule: &[ScheduleItem], resources: &[Resource]) -> Vec<Conflict> {
    detect_conflicts_with_grid(schedule, resources, &SlotGrid::default())
}

/// Find every double-booking in `schedule`.
///
/// The output order is deterministic: buckets in first-seen order, then the
/// teacher → room → group checks, then items in schedule order. Room ids that
/// have no matching resource fall back to the raw id in messages.
pub fn detect_conflicts_with_grid(
    schedule: &[ScheduleItem],
    resources: &[Resource],
    grid: &SlotGrid,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    let buckets = group_by(schedule, |item| (item.day, item.start_time.as_str()));

    for ((day, start_time), items) in &buckets {
        if items.len() < 2 {
            continue;
        }

        for (teacher, cluster) in group_by(items.iter().copied(), |i| i.teacher.as_str()) {
            if cluster.len() > 1 {
                debug!(%day, start_time, teacher, size = cluster.len(), "teacher double-booked");
                teacher_conflicts(schedule, grid, *day, start_time, teacher, &cluster, &mut conflicts);
            }
        }

        for (room_id, cluster) in group_by(items.iter().copied(), |i| i.room_id.as_str()) {
            if cluster.len() > 1 {
                debug!(%day, start_time, room_id, size = cluster.len(), "room double-booked");
                room_conflicts(resources, items, room_id, &cluster, &mut conflicts);
            }
        }

        for (group, cluster) in group_by(items.iter().copied(), |i| i.student_group.as_str()) {
            if cluster.len() > 1 {
                debug!(%day, start_time, group, size = cluster.len(), "student group double-booked");
                group_conflicts(group, &cluster, &mut conflicts);
            }
        }
    }

    trace!(
        items = schedule.len(),
        slots = buckets.len(),
        conflicts = conflicts.len(),
        "conflict detection pass complete"
    );

    conflicts
}

/// All conflicts attached to `item_id`, in detection order.
pub fn conflicts_for<'a>(conflicts: &'a [Conflict], item_id: &str) -> Vec<&'a Conflict> {
    conflicts.iter().filter(|c| c.item_id == item_id).collect()
}

/// Distinct ids of conflicting items, in first-seen order.
pub fn conflicting_item_ids(conflicts: &[Conflict]) -> Vec<&str> {
    let mut seen = HashSet::new();
    conflicts
        .iter()
        .map(|c| c.item_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

fn teacher_conflicts(
    schedule: &[ScheduleItem],
    grid: &SlotGrid,
    day: Weekday,
    start_time: &str,
    teacher: &str,
    cluster: &[&ScheduleItem],
    out: &mut Vec<Conflict>,
) {
    let mut suggestions = vec![format!("Check {teacher}'s schedule for an open slot.")];

    // Days outside the grid have no bookable slots.
    if grid.has_day(day) {
        let occupied = teacher_occupied(schedule, teacher, day);
        if let Some(slot) = grid.next_free_after(start_time, &occupied) {
            suggestions.push(format!("Try moving one class to {slot} on {day}."));
        }
    }

    let message = format!(
        "Teacher {teacher} is double-booked with {}.",
        quoted_subjects(cluster)
    );

    push_for_each(cluster, ConflictKind::Teacher, &message, &suggestions, out);
}

fn room_conflicts(
    resources: &[Resource],
    slot_items: &[&ScheduleItem],
    room_id: &str,
    cluster: &[&ScheduleItem],
    out: &mut Vec<Conflict>,
) {
    let room = resources.iter().find(|r| r.id == room_id);
    let required_capacity = room.and_then(Resource::declared_capacity);

    // Every room in use at this slot, including the contested one.
    let booked: HashSet<&str> = slot_items.iter().map(|i| i.room_id.as_str()).collect();

    let candidates: Vec<String> = resources
        .iter()
        .filter(|r| r.is_room() && !booked.contains(r.id.as_str()))
        .filter(|r| match required_capacity {
            Some(required) => r.declared_capacity().is_some_and(|cap| cap >= required),
            None => true,
        })
        .take(MAX_ROOM_SUGGESTIONS)
        .map(|r| match r.declared_capacity() {
            Some(cap) => format!("{} (Cap: {cap})", r.name),
            None => r.name.clone(),
        })
        .collect();

    let suggestions = if candidates.is_empty() {
        vec![NO_ROOM_AVAILABLE.to_string()]
    } else {
        vec![format!("Try moving to: {}.", candidates.join(", "))]
    };

    let room_name = room.map_or(room_id, |r| r.name.as_str());
    let bookings = cluster
        .iter()
        .map(|i| format!("'{}' ({})", i.subject, i.teacher))
        .collect::<Vec<_>>()
        .join(" and ");
    let message = format!("Room {room_name} is double-booked with {bookings}.");

    push_for_each(cluster, ConflictKind::Room, &message, &suggestions, out);
}

fn group_conflicts(group: &str, cluster: &[&ScheduleItem], out: &mut Vec<Conflict>) {
    let suggestions = vec![format!("Check the schedule for {group} to find an open slot.")];
    let message = format!(
        "Group {group} is double-booked with {}.",
        quoted_subjects(cluster)
    );

    push_for_each(cluster, ConflictKind::StudentGroup, &message, &suggestions, out);
}

fn quoted_subjects(cluster: &[&ScheduleItem]) -> String {
    cluster
        .iter()
        .map(|i| format!("'{}'", i.subject))
        .collect::<Vec<_>>()
        .join(" and ")
}

fn push_for_each(
    cluster: &[&ScheduleItem],
    kind: ConflictKind,
    message: &str,
    suggestions: &[String],
    out: &mut Vec<Conflict>,
) {
    out.extend(cluster.iter().map(|item| Conflict {
        item_id: item.id.clone(),
        kind,
        message: message.to_string(),
        suggestions: suggestions.to_vec(),
    }));
}

/// Group items by `key`, keeping groups in first-seen order and members in
/// input order.
fn group_by<'a, K, I, F>(items: I, key: F) -> Vec<(K, Vec<&'a ScheduleItem>)>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = &'a ScheduleItem>,
    F: Fn(&'a ScheduleItem) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a ScheduleItem>)> = Vec::new();

    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                index.insert(k, groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}
