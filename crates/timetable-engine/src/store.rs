//! Holder for the current timetable and its latest conflict set.
//!
//! Every mutation replaces state wholesale, reruns conflict detection, and
//! notifies subscribers with the new conflicts. There is no merging, diffing,
//! or incremental recompute: callers that edit one item build the full next
//! schedule and hand it to [`ScheduleStore::replace_schedule`].

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::conflict::{self, detect_conflicts_with_grid};
use crate::error::{Result, TimetableError};
use crate::model::{Conflict, NewScheduleItem, Resource, ScheduleItem};
use crate::slots::SlotGrid;
use crate::validate::{validate_resources, validate_schedule};

/// Handle returned by [`ScheduleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Conflict])>;

/// The current schedule, resources, and derived conflicts.
pub struct ScheduleStore {
    schedule: Vec<ScheduleItem>,
    resources: Vec<Resource>,
    grid: SlotGrid,
    conflicts: Vec<Conflict>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    next_item_seq: u64,
}

impl ScheduleStore {
    pub fn new(schedule: Vec<ScheduleItem>, resources: Vec<Resource>) -> Self {
        Self::with_grid(schedule, resources, SlotGrid::default())
    }

    pub fn with_grid(schedule: Vec<ScheduleItem>, resources: Vec<Resource>, grid: SlotGrid) -> Self {
        let conflicts = detect_conflicts_with_grid(&schedule, &resources, &grid);
        Self {
            schedule,
            resources,
            grid,
            conflicts,
            listeners: Vec::new(),
            next_subscription: 0,
            next_item_seq: 0,
        }
    }

    pub fn schedule(&self) -> &[ScheduleItem] {
        &self.schedule
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Conflicts from the most recent detection pass.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn conflicts_for(&self, item_id: &str) -> Vec<&Conflict> {
        conflict::conflicts_for(&self.conflicts, item_id)
    }

    pub fn has_conflict(&self, item_id: &str) -> bool {
        self.conflicts.iter().any(|c| c.item_id == item_id)
    }

    /// Replace the whole schedule, then recompute and notify.
    pub fn replace_schedule(&mut self, schedule: Vec<ScheduleItem>) {
        debug!(items = schedule.len(), "replacing schedule");
        self.schedule = schedule;
        self.recompute();
    }

    /// Replace the schedule only if it passes [`validate_schedule`].
    ///
    /// Meant for drafts from external producers (e.g. a generated timetable).
    /// On rejection the store is left untouched and no subscriber runs.
    ///
    /// # Errors
    /// Returns `TimetableError::InvalidSchedule` with every issue found.
    pub fn replace_schedule_checked(&mut self, schedule: Vec<ScheduleItem>) -> Result<()> {
        let issues = validate_schedule(&schedule, &self.resources);
        if !issues.is_empty() {
            warn!(issues = issues.len(), "rejected schedule draft");
            return Err(TimetableError::InvalidSchedule(issues));
        }
        self.replace_schedule(schedule);
        Ok(())
    }

    /// Replace the resource list, then recompute and notify.
    pub fn replace_resources(&mut self, resources: Vec<Resource>) {
        let duplicates = validate_resources(&resources);
        if !duplicates.is_empty() {
            warn!(issues = duplicates.len(), "resource list has duplicate ids");
        }
        self.resources = resources;
        self.recompute();
    }

    /// Append a new class under a freshly assigned id, then recompute and notify.
    pub fn add_item(&mut self, draft: NewScheduleItem) -> &ScheduleItem {
        let id = self.fresh_id();
        let mut next = self.schedule.clone();
        next.push(draft.with_id(id));
        self.replace_schedule(next);
        // Just pushed, so the schedule is non-empty.
        &self.schedule[self.schedule.len() - 1]
    }

    /// Register a callback that receives the conflict set after every recompute.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Conflict]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn recompute(&mut self) {
        self.conflicts = detect_conflicts_with_grid(&self.schedule, &self.resources, &self.grid);
        if !self.conflicts.is_empty() {
            info!(
                conflicts = self.conflicts.len(),
                items = self.schedule.len(),
                "schedule has conflicts"
            );
        }
        for (_, listener) in &mut self.listeners {
            listener(&self.conflicts);
        }
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = format!("{}-{}", Utc::now().timestamp_millis(), self.next_item_seq);
            self.next_item_seq += 1;
            if !self.schedule.iter().any(|i| i.id == id) {
                return id;
            }
        }
    }
}

impl std::fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleStore")
            .field("schedule", &self.schedule.len())
            .field("resources", &self.resources.len())
            .field("conflicts", &self.conflicts.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
