//! Delivery of the day's reading unit
//!
//! A delivery backend receives the book title, the unit and a progress
//! snapshot. Whether it succeeds never feeds back into progress.

mod outbox;
mod render;

pub use outbox::OutboxDelivery;
pub use render::{format_content, render_html, render_subject};

use crate::error::DeliveryError;
use crate::types::{BookProgress, ReadingUnit};
use std::path::PathBuf;

/// What gets delivered for one reading day
#[derive(Debug, Clone, Copy)]
pub struct DailyReading<'a> {
    pub book_title: &'a str,
    pub unit: &'a ReadingUnit,

    /// Reading day this unit belongs to (1-based)
    pub day: u32,

    /// Position of the unit in the book (1-based)
    pub position: usize,

    pub total_units: usize,
}

impl<'a> DailyReading<'a> {
    /// Build from the progress snapshot taken *before* the unit was marked read
    pub fn upcoming(book_title: &'a str, unit: &'a ReadingUnit, progress: &BookProgress) -> Self {
        Self {
            book_title,
            unit,
            day: progress.reading_days + 1,
            position: progress.current_unit + 1,
            total_units: progress.total_units,
        }
    }

    /// Share of the book read once this unit is done, clamped to 0..=100
    pub fn percentage(&self) -> f64 {
        if self.total_units == 0 {
            return 0.0;
        }
        (self.position as f64 / self.total_units as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_final(&self) -> bool {
        self.position >= self.total_units
    }
}

/// Outcome of a successful delivery
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub recipient: String,

    /// Where the message was placed, for file-based backends
    pub location: Option<PathBuf>,
}

/// Trait for delivering daily readings
pub trait Delivery: Send + Sync {
    /// Render and hand off one reading
    fn deliver(&self, reading: &DailyReading<'_>) -> Result<DeliveryReceipt, DeliveryError>;

    /// Check the configuration without delivering anything
    fn verify(&self) -> Result<(), DeliveryError>;

    /// Backend name for messages
    fn name(&self) -> &str;
}
