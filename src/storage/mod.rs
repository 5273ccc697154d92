//! Durable key/value storage for user preferences.
//!
//! The only value persisted today is the last search term. Backends report
//! failures as [`AppError::StorageUnavailable`](crate::error::AppError);
//! [`PersistedPreference`] absorbs those so callers never see them.
//!
//! ## File Layout
//!
//! ```text
//! {data_dir}/
//! └── preferences.json      # { "updated_at": ..., "values": { "search": "React" } }
//! ```

pub mod local;
pub mod memory;
pub mod preference;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::FileStore;
pub use memory::MemoryStore;
pub use preference::PersistedPreference;

/// Trait for preference storage backends.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
