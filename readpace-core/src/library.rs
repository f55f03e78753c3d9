//! Persistent library: chunk records and the progress store
//!
//! Every progress change runs as one transaction (load, mutate, save) behind
//! a mutex, so two advances of the same book never lose an increment.

use crate::error::{Result, StorageError};
use crate::progress::ProgressTracker;
use crate::stats::ReadingStatistics;
use crate::storage::StorageProvider;
use crate::types::{BookProgress, ChunkSequence, ChunkSettings, ReadingUnit};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Storage key of the progress store
pub const PROGRESS_KEY: &str = "progress.json";

const CHUNK_SUFFIX: &str = "_chunks.json";

/// Stored form of a chunk sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkRecord {
    pub title: String,
    pub chunks: Vec<ReadingUnit>,
    pub total_chunks: usize,
    pub total_words: usize,
    pub total_reading_time: f64,

    /// Pace the sequence was built with; absent in records written before
    /// settings were stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ChunkSettings>,
}

impl ChunkRecord {
    pub fn new(sequence: &ChunkSequence, settings: ChunkSettings) -> Self {
        Self {
            title: sequence.title().to_string(),
            chunks: sequence.units().to_vec(),
            total_chunks: sequence.len(),
            total_words: sequence.total_words(),
            total_reading_time: sequence.total_minutes(),
            settings: Some(settings),
        }
    }

    pub fn unit(&self, index: usize) -> Option<&ReadingUnit> {
        self.chunks.get(index)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// False when the record is known to have been built with other settings
    pub fn matches_settings(&self, settings: &ChunkSettings) -> bool {
        self.settings.map_or(true, |built| built == *settings)
    }
}

/// File stem used to name a book's chunk record (`novel.txt` -> `novel`)
pub fn book_stem(book_id: &str) -> &str {
    Path::new(book_id)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(book_id)
}

/// Storage key of a book's chunk record
pub fn chunk_key(book_id: &str) -> String {
    format!("{}{}", book_stem(book_id), CHUNK_SUFFIX)
}

/// Chunk records and progress over a storage backend
pub struct Library {
    storage: Arc<dyn StorageProvider>,
    progress_lock: Mutex<()>,
}

impl Library {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            progress_lock: Mutex::new(()),
        }
    }

    /// Persist the chunk record of a book, replacing any previous one
    pub async fn save_chunks(&self, book_id: &str, record: &ChunkRecord) -> Result<()> {
        let key = chunk_key(book_id);
        self.write_json(&key, record).await?;
        tracing::info!(book = book_id, key = %key, units = record.total_chunks, "saved chunk record");
        Ok(())
    }

    /// Load a book's chunk record, `None` when the book was never processed
    pub async fn load_chunks(&self, book_id: &str) -> Result<Option<ChunkRecord>> {
        self.read_json(&chunk_key(book_id)).await
    }

    /// Stems of every book with a chunk record
    pub async fn processed_books(&self) -> Result<Vec<String>> {
        let entries = match self.storage.list("").await {
            Ok(entries) => entries,
            Err(StorageError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(entries
            .iter()
            .filter_map(|name| name.strip_suffix(CHUNK_SUFFIX))
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Snapshot of the progress store
    pub async fn tracker(&self) -> Result<ProgressTracker> {
        Ok(self.read_json(PROGRESS_KEY).await?.unwrap_or_default())
    }

    pub async fn progress(&self, book_id: &str) -> Result<BookProgress> {
        Ok(self.tracker().await?.get_progress(book_id))
    }

    pub async fn statistics(&self) -> Result<ReadingStatistics> {
        Ok(self.tracker().await?.statistics())
    }

    pub async fn set_total_units(&self, book_id: &str, total_units: usize) -> Result<BookProgress> {
        self.update(|tracker| tracker.set_total_units(book_id, total_units))
            .await
    }

    /// Mark the next unit of a book as read
    pub async fn advance(&self, book_id: &str, total_units: usize) -> Result<BookProgress> {
        self.update(|tracker| tracker.advance(book_id, total_units))
            .await
    }

    pub async fn reset(&self, book_id: &str, total_units: usize) -> Result<BookProgress> {
        self.update(|tracker| tracker.reset(book_id, total_units))
            .await
    }

    /// Run `f` against the progress store as a single transaction.
    ///
    /// Nothing is written when loading fails, and a failed save leaves the
    /// previously stored progress intact.
    pub async fn update<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ProgressTracker) -> T,
    {
        let _guard = self.progress_lock.lock().await;
        let mut tracker = self.tracker().await?;
        let out = f(&mut tracker);
        self.write_json(PROGRESS_KEY, &tracker).await?;
        Ok(out)
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let data = match self.storage.read(key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| {
                StorageError::Corrupt {
                    path: key.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Corrupt {
            path: key.to_string(),
            reason: e.to_string(),
        })?;
        self.storage.write(key, data).await?;
        Ok(())
    }
}
