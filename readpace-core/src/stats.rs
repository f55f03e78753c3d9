//! Cross-book reading statistics

use crate::types::BookProgress;
use serde::{Deserialize, Serialize};

/// Summary counts over all tracked books
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStatistics {
    pub active_books: usize,
    pub completed_books: usize,
    pub total_reading_days: u64,
}

/// Summarize progress records.
///
/// A book is completed when its `completed` flag is set and active otherwise,
/// including books that were tracked but never started.
pub fn summarize<'a, I>(books: I) -> ReadingStatistics
where
    I: IntoIterator<Item = &'a BookProgress>,
{
    books
        .into_iter()
        .fold(ReadingStatistics::default(), |mut stats, progress| {
            if progress.completed {
                stats.completed_books += 1;
            } else {
                stats.active_books += 1;
            }
            stats.total_reading_days += u64::from(progress.reading_days);
            stats
        })
}
