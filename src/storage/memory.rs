//! In-process preference store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::PreferenceStore;

/// Preference store that forgets everything on exit.
///
/// `MemoryStore::unavailable()` builds a store whose every operation
/// fails, standing in for a backend that cannot be reached.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Pre-populate a key.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(AppError::storage("memory store is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        let values = self.values.lock().map_err(AppError::storage)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        let mut values = self.values.lock().map_err(AppError::storage)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set("search", "React").await.unwrap();
        assert_eq!(store.get("search").await.unwrap(), Some("React".to_string()));
    }

    #[tokio::test]
    async fn test_with_value() {
        let store = MemoryStore::new().with_value("search", "Redux");
        assert_eq!(store.get("search").await.unwrap(), Some("Redux".to_string()));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::unavailable();
        assert!(matches!(
            store.get("search").await,
            Err(AppError::StorageUnavailable(_))
        ));
        assert!(store.set("search", "React").await.is_err());
    }
}
