//! Read command implementation

use super::{book_id, open_library, outbox_delivery};
use crate::config::load_settings;
use anyhow::{bail, Result};
use readpace_core::delivery::{DailyReading, Delivery};
use std::path::Path;

/// Characters shown when previewing a unit
const PREVIEW_CHARS: usize = 500;

/// Show the next unread unit of a book; with `send`, mark it read and deliver it
pub async fn read(data_dir: &Path, book: Option<&str>, send: bool, full: bool) -> Result<()> {
    let settings = load_settings(data_dir)?;

    let Some(book) = book.map(str::to_string).or_else(|| settings.current_book.clone()) else {
        bail!("No book specified. Use: readpace read <file>");
    };
    let id = book_id(&book);

    let library = open_library(data_dir);
    let Some(record) = library.load_chunks(&id).await? else {
        bail!(
            "No units found for {}. Process the book first: readpace process {}",
            id,
            book
        );
    };

    let pace = settings.chunk_settings();
    if !record.matches_settings(&pace) {
        tracing::warn!(
            book = %id,
            target_minutes = pace.target_minutes,
            words_per_minute = pace.words_per_minute,
            "units were built with different pacing settings; run process again to re-chunk"
        );
    }

    if record.is_empty() {
        println!("Nothing to read in {}", id);
        return Ok(());
    }

    let progress = library.progress(&id).await?;
    let Some(unit) = record.unit(progress.current_unit) else {
        println!("Book completed!");
        return Ok(());
    };

    let reading = DailyReading {
        total_units: record.len(),
        ..DailyReading::upcoming(&record.title, unit, &progress)
    };

    println!();
    println!("Daily Reading: {}", record.title);
    println!("{}", "=".repeat(50));
    println!("Day: {}", reading.day);
    println!(
        "Progress: {}/{} ({:.1}%)",
        reading.position,
        reading.total_units,
        reading.percentage()
    );
    println!("Reading time: {:.1} minutes", unit.estimated_minutes());
    println!("Words: {}", unit.word_count());
    println!();
    println!("Content:");
    println!("{}", "-".repeat(30));
    print_content(unit.content(), full);
    println!("{}", "-".repeat(30));

    if !send {
        println!();
        println!("This was a preview. Use --send to mark it as read:");
        println!("  readpace read {} --send", book);
        return Ok(());
    }

    let updated = library.advance(&id, record.len()).await?;
    println!();
    println!(
        "Progress updated: {}/{} units read",
        updated.current_unit, updated.total_units
    );

    if settings.enable_email {
        let delivery = outbox_delivery(data_dir, &settings);
        match delivery.deliver(&reading) {
            Ok(receipt) => match receipt.location {
                Some(location) => {
                    println!("Queued for {}: {}", receipt.recipient, location.display())
                }
                None => println!("Sent to {}", receipt.recipient),
            },
            Err(e) => {
                tracing::warn!(book = %id, error = %e, "delivery failed");
                eprintln!("Delivery via {} failed: {}", delivery.name(), e);
            }
        }
    }

    if reading.is_final() {
        println!("Congratulations! You've completed the book!");
    }

    Ok(())
}

fn print_content(content: &str, full: bool) {
    let total = content.chars().count();
    if full || total <= PREVIEW_CHARS {
        println!("{}", content);
        return;
    }

    let preview: String = content.chars().take(PREVIEW_CHARS).collect();
    println!("{}...", preview);
    println!();
    println!("[{} more characters, use --full to show everything]", total - PREVIEW_CHARS);
}
