//! Storage abstraction for chunk records and the progress store

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Key/value storage backend
///
/// Writes replace the whole value at once: a failed write leaves the previous
/// value untouched.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read data from the given path
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write data to the given path
    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()>;

    /// List entry names under the given prefix
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;
}

fn io_error(path: &str, e: std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
        ErrorKind::PermissionDenied => StorageError::PermissionDenied(path.to_string()),
        _ => StorageError::BackendError(format!("{}: {}", path, e)),
    }
}

/// Local filesystem storage provider
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Safely resolve a path, preventing path traversal attacks
    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::BackendError(
                        "Path traversal attempt detected".to_string(),
                    ));
                }
            }
        }

        Ok(self.root.join(normalized))
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        tokio::fs::read(full_path)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, e))?;
        }

        // Temp file in the same directory keeps the rename on one filesystem
        let mut temp_name = full_path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| io_error(path, e))?;
        if let Err(e) = tokio::fs::rename(&temp_path, &full_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(io_error(path, e));
        }

        tracing::trace!(path, "wrote record");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let full_path = self.full_path(prefix)?;
        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&full_path)
            .await
            .map_err(|e| io_error(prefix, e))?;

        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| io_error(prefix, e))?
        {
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        tokio::fs::try_exists(full_path)
            .await
            .map_err(|e| io_error(path, e))
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::BackendError("memory storage lock poisoned".to_string())
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .map_err(|_| Self::poisoned())?
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(path.to_string(), data);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .contains_key(path))
    }
}
