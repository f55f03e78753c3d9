//! Setup command implementation

use super::display_or_unset;
use crate::config::{load_settings, save_settings, settings_path, AppSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create the data directory layout and write default settings if none exist
pub fn setup(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let path = settings_path(data_dir);
    if path.exists() {
        println!("Settings found:  {}", path.display());
    } else {
        save_settings(data_dir, &AppSettings::default())?;
        println!("Settings written: {}", path.display());
    }

    let settings = load_settings(data_dir)?;
    for dir in [settings.books_dir(data_dir), settings.outbox_dir(data_dir)] {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    tracing::info!(data_dir = %data_dir.display(), "setup complete");

    println!("User:            {}", display_or_unset(&settings.user_email));
    println!("Reading time:    {} minutes", settings.target_reading_time_minutes);
    println!("Reading speed:   {} words per minute", settings.words_per_minute);
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to set your email address", path.display());
    println!("  2. Add a book to {}", settings.books_dir(data_dir).display());
    println!("  3. Run 'readpace process <file>'");
    println!("  4. Run 'readpace read <file>'");

    Ok(())
}
