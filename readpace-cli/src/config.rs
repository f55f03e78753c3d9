//! Settings loading
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `<data-dir>/settings.json`
//! 3. `READPACE_*` environment variables (e.g. `READPACE_WORDS_PER_MINUTE=250`)

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use readpace_core::ChunkSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the settings file inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Recipient of daily readings
    pub user_email: String,
    pub user_name: String,
    pub target_reading_time_minutes: f64,
    pub words_per_minute: u32,

    /// Book used by `read` when none is given
    pub current_book: Option<String>,

    /// Book directory; relative paths resolve against the data directory
    pub book_storage_path: String,

    pub enable_email: bool,
    pub sender_email: String,

    /// Pickup directory for queued messages, relative to the data directory
    /// unless absolute
    pub outbox_path: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        let pace = ChunkSettings::default();
        Self {
            user_email: String::new(),
            user_name: "Reader".to_string(),
            target_reading_time_minutes: pace.target_minutes,
            words_per_minute: pace.words_per_minute,
            current_book: None,
            book_storage_path: "books".to_string(),
            enable_email: false,
            sender_email: "readpace@localhost".to_string(),
            outbox_path: "outbox".to_string(),
        }
    }
}

impl AppSettings {
    pub fn chunk_settings(&self) -> ChunkSettings {
        ChunkSettings::new(self.target_reading_time_minutes, self.words_per_minute)
    }

    pub fn books_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.book_storage_path)
    }

    pub fn outbox_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.outbox_path)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.words_per_minute >= 1,
            "words_per_minute must be at least 1"
        );
        ensure!(
            self.target_reading_time_minutes.is_finite() && self.target_reading_time_minutes > 0.0,
            "target_reading_time_minutes must be greater than 0"
        );
        Ok(())
    }
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

/// Load and validate settings for a data directory
pub fn load_settings(data_dir: &Path) -> Result<AppSettings> {
    load_layered(data_dir, None)
}

/// Layered load; `env_vars` replaces the process environment when given
fn load_layered(data_dir: &Path, env_vars: Option<Map<String, String>>) -> Result<AppSettings> {
    let path = settings_path(data_dir);

    let config = Config::builder()
        .add_source(File::from(path.as_path()).format(FileFormat::Json).required(false))
        .add_source(
            Environment::with_prefix("READPACE")
                .try_parsing(true)
                .source(env_vars),
        )
        .build()
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    let settings: AppSettings = config
        .try_deserialize()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    settings.validate()?;

    tracing::debug!(?settings, "loaded settings");
    Ok(settings)
}

/// Write settings as pretty JSON
pub fn save_settings(data_dir: &Path, settings: &AppSettings) -> Result<()> {
    let path = settings_path(data_dir);
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Load with no environment variables at all
    fn load_isolated(data_dir: &Path) -> Result<AppSettings> {
        load_layered(data_dir, Some(Map::new()))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_isolated(dir.path()).unwrap();
        assert_eq!(settings.words_per_minute, 200);
        assert_eq!(settings.target_reading_time_minutes, 10.0);
        assert!(!settings.enable_email);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            settings_path(dir.path()),
            r#"{ "words_per_minute": 250, "current_book": "novel.txt" }"#,
        )
        .unwrap();

        let settings = load_isolated(dir.path()).unwrap();
        assert_eq!(settings.words_per_minute, 250);
        assert_eq!(settings.current_book.as_deref(), Some("novel.txt"));
        assert_eq!(settings.user_name, "Reader");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            user_email: "me@example.com".into(),
            target_reading_time_minutes: 15.0,
            ..AppSettings::default()
        };
        save_settings(dir.path(), &settings).unwrap();
        assert_eq!(load_isolated(dir.path()).unwrap(), settings);
    }

    #[test]
    fn test_invalid_pace_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), r#"{ "words_per_minute": 0 }"#).unwrap();
        assert!(load_isolated(dir.path()).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), r#"{ "words_per_minute": 250 }"#).unwrap();

        let vars = Map::from_iter([
            ("READPACE_WORDS_PER_MINUTE".to_string(), "300".to_string()),
            ("READPACE_ENABLE_EMAIL".to_string(), "true".to_string()),
        ]);
        let settings = load_layered(dir.path(), Some(vars)).unwrap();
        assert_eq!(settings.words_per_minute, 300);
        assert!(settings.enable_email);
    }
}
