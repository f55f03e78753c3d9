//! Status command implementation

use super::{display_or_unset, open_library};
use crate::config::load_settings;
use anyhow::{Context, Result};
use readpace_core::library::book_stem;
use readpace_core::source::is_supported_extension;
use readpace_core::{ProgressState, ReadingStatistics};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Status output
#[derive(Serialize)]
struct StatusReport {
    user: String,
    target_reading_time_minutes: f64,
    words_per_minute: u32,
    statistics: ReadingStatistics,
    books: Vec<BookStatus>,
}

#[derive(Serialize)]
struct BookStatus {
    book: String,
    processed: bool,
    state: ProgressState,
    current_unit: usize,
    total_units: usize,
    percentage: f64,
    reading_days: u32,
}

impl BookStatus {
    fn describe(&self) -> String {
        if !self.processed && self.total_units == 0 {
            return "Not processed".to_string();
        }
        match self.state {
            ProgressState::Completed => "Completed".to_string(),
            ProgressState::NotStarted => format!("Not started ({} units)", self.total_units),
            ProgressState::InProgress => format!(
                "Reading ({:.0}%, {}/{})",
                self.percentage, self.current_unit, self.total_units
            ),
        }
    }
}

/// Show reading statistics and where every known book stands
pub async fn status(data_dir: &Path, json: bool) -> Result<()> {
    let settings = load_settings(data_dir)?;
    let library = open_library(data_dir);
    let tracker = library.tracker().await?;
    let processed: BTreeSet<String> = library.processed_books().await?.into_iter().collect();

    let mut ids: BTreeSet<String> = book_files(&settings.books_dir(data_dir))?;
    ids.extend(tracker.books().map(|(id, _)| id.to_string()));

    let mut books: BTreeMap<String, BookStatus> = ids
        .into_iter()
        .map(|id| {
            let progress = tracker.get_progress(&id);
            let status = BookStatus {
                book: id.clone(),
                processed: processed.contains(book_stem(&id)),
                state: progress.state(),
                current_unit: progress.current_unit,
                total_units: progress.total_units,
                percentage: progress.percentage(),
                reading_days: progress.reading_days,
            };
            (id, status)
        })
        .collect();

    // Chunk records with no matching book file or progress entry
    for stem in &processed {
        if !books.values().any(|b| book_stem(&b.book) == stem.as_str()) {
            books.insert(
                stem.clone(),
                BookStatus {
                    book: stem.clone(),
                    processed: true,
                    state: ProgressState::NotStarted,
                    current_unit: 0,
                    total_units: 0,
                    percentage: 0.0,
                    reading_days: 0,
                },
            );
        }
    }

    let report = StatusReport {
        user: settings.user_email.clone(),
        target_reading_time_minutes: settings.target_reading_time_minutes,
        words_per_minute: settings.words_per_minute,
        statistics: tracker.statistics(),
        books: books.into_values().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Daily Reading Status");
    println!("{}", "=".repeat(30));
    println!("User:         {}", display_or_unset(&report.user));
    println!("Reading time: {} minutes", report.target_reading_time_minutes);
    println!();
    println!("Statistics:");
    println!("  Active books:       {}", report.statistics.active_books);
    println!("  Completed books:    {}", report.statistics.completed_books);
    println!("  Total reading days: {}", report.statistics.total_reading_days);

    if !report.books.is_empty() {
        println!();
        println!("Books:");
        for book in &report.books {
            println!("  {}: {}", book.book, book.describe());
        }
    }

    Ok(())
}

/// Names of files in the books directory that have a text source
fn book_files(books_dir: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    if !books_dir.is_dir() {
        return Ok(names);
    }

    let entries = fs::read_dir(books_dir)
        .with_context(|| format!("Failed to read books directory: {}", books_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(is_supported_extension);
        if path.is_file() && supported {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.insert(name.to_string());
            }
        }
    }
    Ok(names)
}
