// src/models/mod.rs

//! Domain models for the story search client.

mod config;
mod story;

// Re-export all public types
pub use config::{ApiConfig, Config, SearchConfig, StorageConfig};
pub use story::{SearchResponse, Story, StoryId};
