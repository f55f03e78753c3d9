//! Per-book reading progress

use serde::{Deserialize, Serialize};

/// Where a book stands in its reading lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    NotStarted,
    InProgress,
    Completed,
}

/// Progress record for one book
///
/// Serialized with the field names of the progress store. Missing fields
/// default to zero/false so hand-edited or older records still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookProgress {
    /// Index of the next unit to read
    #[serde(rename = "current_chunk")]
    pub current_unit: usize,

    #[serde(rename = "total_chunks")]
    pub total_units: usize,

    /// Number of completed advance events
    pub reading_days: u32,

    pub completed: bool,
}

impl BookProgress {
    /// Mark the current unit as read.
    ///
    /// Idempotent once every unit has been read.
    pub(crate) fn mark_unit_read(&mut self, total_units: usize) {
        self.total_units = total_units;
        if self.current_unit < self.total_units {
            self.current_unit += 1;
            self.reading_days += 1;
        }
        if self.total_units > 0 && self.current_unit >= self.total_units {
            self.completed = true;
        }
    }

    /// Re-derive the completed flag after the unit count changed
    pub(crate) fn rebase(&mut self, total_units: usize) {
        self.total_units = total_units;
        self.completed = total_units > 0 && self.current_unit >= total_units;
    }

    /// True when the completed flag is set or every unit has been read,
    /// however the record got there
    pub fn is_finished(&self) -> bool {
        self.completed || (self.total_units > 0 && self.current_unit >= self.total_units)
    }

    pub fn state(&self) -> ProgressState {
        if self.is_finished() {
            ProgressState::Completed
        } else if self.current_unit == 0 {
            ProgressState::NotStarted
        } else {
            ProgressState::InProgress
        }
    }

    /// Share of units read, clamped to `0.0..=100.0`
    pub fn percentage(&self) -> f64 {
        if self.total_units == 0 {
            return 0.0;
        }
        (self.current_unit as f64 / self.total_units as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Units left to read
    pub fn remaining(&self) -> usize {
        self.total_units.saturating_sub(self.current_unit)
    }
}
