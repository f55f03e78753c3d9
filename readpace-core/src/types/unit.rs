//! Reading units and the sequence produced for one document

use serde::{Deserialize, Serialize};

/// One day's slice of a book
///
/// Built only by the chunker (or read back from a stored record); fields are
/// read through accessors so a unit never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingUnit {
    index: usize,
    content: String,
    word_count: usize,
    #[serde(rename = "estimated_reading_time")]
    estimated_minutes: f64,
}

impl ReadingUnit {
    pub(crate) fn new(index: usize, content: String, word_count: usize, minutes: f64) -> Self {
        Self {
            index,
            content,
            word_count,
            estimated_minutes: minutes,
        }
    }

    /// Position of this unit in its sequence (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Paragraphs of this unit, joined by a blank line
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn estimated_minutes(&self) -> f64 {
        self.estimated_minutes
    }
}

/// Ordered reading units for one source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkSequence {
    title: String,
    units: Vec<ReadingUnit>,
    total_words: usize,
    total_minutes: f64,
}

impl ChunkSequence {
    /// Build a sequence from units already indexed `0..n`.
    ///
    /// Totals are sums over the units.
    pub(crate) fn from_units(units: Vec<ReadingUnit>) -> Self {
        let total_words = units.iter().map(|u| u.word_count).sum();
        let total_minutes = units.iter().map(|u| u.estimated_minutes).sum();
        Self {
            title: String::new(),
            units,
            total_words,
            total_minutes,
        }
    }

    /// Attach a title to the sequence
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn units(&self) -> &[ReadingUnit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&ReadingUnit> {
        self.units.get(index)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_minutes
    }

    /// Mean reading time per unit, zero for an empty sequence
    pub fn average_minutes(&self) -> f64 {
        if self.units.is_empty() {
            0.0
        } else {
            self.total_minutes / self.units.len() as f64
        }
    }

    pub fn into_units(self) -> Vec<ReadingUnit> {
        self.units
    }
}
