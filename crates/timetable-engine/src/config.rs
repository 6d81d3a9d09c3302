//! Engine configuration: the slot grid used for teacher suggestions.
//!
//! Read from JSON. Missing fields take the dashboard defaults, so `{}` is a
//! valid configuration.
//!
//! ```json
//! { "timeSlots": ["08:30", "09:30", "10:30"], "days": ["Monday", "Wednesday"] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Weekday;
use crate::slots::{SlotGrid, DEFAULT_TIME_SLOTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Ascending, zero-padded `HH:MM` start times.
    pub time_slots: Vec<String>,
    pub days: Vec<Weekday>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_slots: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
            days: Weekday::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    /// Returns `TimetableError::Io` if the file cannot be read and
    /// `TimetableError::Json` if it is not valid configuration JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn into_grid(self) -> Result<SlotGrid> {
        SlotGrid::new(self.time_slots, self.days)
    }
}
