//! Local filesystem preference store.
//!
//! All preferences live in one JSON document. Writes go to a temp file
//! that is renamed over the original, so a crash never leaves a torn file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::PreferenceStore;

/// On-disk document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesFile {
    /// Timestamp of the last write
    pub updated_at: DateTime<Utc>,
    /// Stored key/value pairs
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl PreferencesFile {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self {
            updated_at: Utc::now(),
            values,
        }
    }
}

/// Preference store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store writing to `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, returning None if the file doesn't exist.
    async fn read_file(&self) -> Result<Option<PreferencesFile>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            AppError::storage(format!("corrupt preferences in {}: {e}", self.path.display()))
        })
    }

    /// Write the document atomically (write to temp, then rename).
    async fn write_file(&self, file: &PreferencesFile) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(file)?;
        self.write_bytes(&bytes).await.map_err(|e| {
            AppError::storage(format!("cannot write {}: {e}", self.path.display()))
        })
    }

    async fn write_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await
    }
}

#[async_trait]
impl PreferenceStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_file()
            .await?
            .and_then(|mut file| file.values.remove(key)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .read_file()
            .await?
            .map(|f| f.values)
            .unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        self.write_file(&PreferencesFile::new(values)).await?;
        log::debug!("Saved preference '{}' to {}", key, self.path.display());
        Ok(())
    }
}
