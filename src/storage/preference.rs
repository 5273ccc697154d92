//! A single string value kept in sync with a [`PreferenceStore`].

use std::sync::Arc;

use crate::storage::PreferenceStore;

/// String preference loaded once and written back on every change.
///
/// The value read at start-up is never written back, and setting the
/// value it already holds is not a change. Backend failures are logged
/// and otherwise ignored: reads fall back to the default, writes are
/// dropped.
pub struct PersistedPreference {
    store: Arc<dyn PreferenceStore>,
    key: String,
    value: String,
    writes: usize,
}

impl PersistedPreference {
    /// Read `key` from `store`, falling back to `default` when it is
    /// absent, empty or unreadable.
    pub async fn load(
        store: Arc<dyn PreferenceStore>,
        key: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let value = match store.get(&key).await {
            Ok(Some(value)) if !value.is_empty() => {
                log::debug!("Restored preference '{}' = {:?}", key, value);
                value
            }
            Ok(_) => default.into(),
            Err(e) => {
                log::warn!("Preference '{}' unavailable: {}. Using default.", key, e);
                default.into()
            }
        };

        Self {
            store,
            key,
            value,
            writes: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and persist it if it changed.
    pub async fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.value {
            return;
        }
        self.value = value;

        match self.store.set(&self.key, &self.value).await {
            Ok(()) => self.writes += 1,
            Err(e) => log::warn!("Could not persist preference '{}': {}", self.key, e),
        }
    }

    /// Number of successful writes since load.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl std::fmt::Debug for PersistedPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedPreference")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("writes", &self.writes)
            .finish()
    }
}
