//! Per-book progress state machine
//!
//! A book moves from not started, through in progress, to completed. The
//! tracker holds every known book and serializes to the progress store shape
//! `{ "books": { <id>: { current_chunk, total_chunks, reading_days, completed } } }`.

use crate::stats::{summarize, ReadingStatistics};
use crate::types::BookProgress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Progress for every tracked book, keyed by book identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressTracker {
    #[serde(default)]
    books: BTreeMap<String, BookProgress>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current progress for a book, or a zero record if it was never seen
    pub fn get_progress(&self, book_id: &str) -> BookProgress {
        self.books.get(book_id).copied().unwrap_or_default()
    }

    /// Record how many units a book has without moving its position.
    ///
    /// An existing position is kept even when it now lies past the new total;
    /// such a book reads as finished.
    pub fn set_total_units(&mut self, book_id: &str, total_units: usize) -> BookProgress {
        let entry = self.entry(book_id);
        entry.rebase(total_units);
        *entry
    }

    /// Mark one unit of a book as read and return the new snapshot.
    ///
    /// Calling this on a finished book changes nothing.
    pub fn advance(&mut self, book_id: &str, total_units: usize) -> BookProgress {
        let entry = self.entry(book_id);
        entry.mark_unit_read(total_units);
        tracing::debug!(
            book = book_id,
            current = entry.current_unit,
            total = entry.total_units,
            completed = entry.completed,
            "advanced book"
        );
        *entry
    }

    /// Start a book over from its first unit
    pub fn reset(&mut self, book_id: &str, total_units: usize) -> BookProgress {
        let entry = self.entry(book_id);
        *entry = BookProgress {
            total_units,
            ..BookProgress::default()
        };
        *entry
    }

    pub fn contains(&self, book_id: &str) -> bool {
        self.books.contains_key(book_id)
    }

    /// All tracked books in identifier order
    pub fn books(&self) -> impl Iterator<Item = (&str, &BookProgress)> {
        self.books.iter().map(|(id, progress)| (id.as_str(), progress))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn statistics(&self) -> ReadingStatistics {
        summarize(self.books.values())
    }

    fn entry(&mut self, book_id: &str) -> &mut BookProgress {
        self.books.entry(book_id.to_string()).or_default()
    }
}
