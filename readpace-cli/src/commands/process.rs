//! Process command implementation

use super::{book_id, open_library};
use crate::config::load_settings;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use readpace_core::library::{book_stem, chunk_key};
use readpace_core::source::{extract_text, source_for_path};
use readpace_core::text::{count_words, normalize};
use readpace_core::{ChunkRecord, Chunker};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extract, normalize and chunk a book, then store its units
pub async fn process(data_dir: &Path, file: &str, reset: bool) -> Result<()> {
    let settings = load_settings(data_dir)?;
    let path = resolve_book_path(file, &settings.books_dir(data_dir))?;
    let book = book_id(file);
    let format = source_for_path(&path).format_name().to_string();

    println!("Processing: {} ({})", book, format);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Extracting text...");
    let source_path = path.clone();
    let raw = tokio::task::spawn_blocking(move || extract_text(&source_path))
        .await
        .context("Text extraction task failed")?
        .with_context(|| format!("Could not read {}", path.display()))?;

    pb.set_message("Creating units...");
    let text = normalize(&raw);
    let pace = settings.chunk_settings();
    let sequence = Chunker::new(pace).chunk(&text).with_title(book_stem(&book));
    let record = ChunkRecord::new(&sequence, pace);

    pb.set_message("Saving...");
    let library = open_library(data_dir);
    library.save_chunks(&book, &record).await?;
    let progress = if reset {
        library.reset(&book, record.len()).await?
    } else {
        library.set_total_units(&book, record.len()).await?
    };
    pb.finish_and_clear();

    tracing::info!(
        book = %book,
        words = sequence.total_words(),
        units = sequence.len(),
        "processed book"
    );

    if sequence.is_empty() {
        println!("Nothing to read: no text found in {}", path.display());
        return Ok(());
    }

    println!("Loaded:  {} words", count_words(&text));
    println!("Created: {} units", sequence.len());
    println!("  Total reading time:   {:.1} minutes", sequence.total_minutes());
    println!("  Average reading time: {:.1} minutes", sequence.average_minutes());
    println!("Saved units to: {}", data_dir.join(chunk_key(&book)).display());
    println!(
        "Progress: {}/{} units read{}",
        progress.current_unit,
        progress.total_units,
        if reset { " (reset)" } else { "" }
    );

    Ok(())
}

/// The file as given, or the same name inside the books directory
fn resolve_book_path(file: &str, books_dir: &Path) -> Result<PathBuf> {
    let direct = PathBuf::from(file);
    if direct.is_file() {
        return Ok(direct);
    }
    let in_books = books_dir.join(file);
    if in_books.is_file() {
        return Ok(in_books);
    }
    bail!("File not found: {}", file)
}
