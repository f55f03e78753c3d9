//! Readpace Core Library
//!
//! Splits long texts into daily reading units sized to a target reading time
//! and tracks per-book progress across sessions. Documents are reduced to
//! text by a [`source::TextSource`], normalized, chunked on paragraph
//! boundaries, and stored through a [`storage::StorageProvider`].

pub mod chunker;
pub mod delivery;
pub mod error;
pub mod library;
pub mod progress;
pub mod source;
pub mod stats;
pub mod storage;
pub mod text;
pub mod types;

pub use chunker::Chunker;
pub use error::{DeliveryError, ParseError, ReadpaceError, Result, StorageError};
pub use library::{ChunkRecord, Library};
pub use progress::ProgressTracker;
pub use stats::ReadingStatistics;
pub use types::{BookProgress, ChunkSequence, ChunkSettings, ProgressState, ReadingUnit};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_progress() {
        let raw = "  First  paragraph here.\n\n\n\nSecond \u{201C}one\u{201D}.  ";
        let text = text::normalize(raw);
        let sequence = Chunker::new(ChunkSettings::new(0.01, 200)).chunk(&text);
        assert_eq!(sequence.len(), 2);

        let mut tracker = ProgressTracker::new();
        tracker.set_total_units("book.txt", sequence.len());
        tracker.advance("book.txt", sequence.len());
        assert_eq!(tracker.get_progress("book.txt").state(), ProgressState::InProgress);
    }
}
