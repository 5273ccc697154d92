//! Service layer for the story client.
//!
//! This module contains:
//! - Remote story search (`StorySource`, `AlgoliaClient`)
//! - Draft/committed query handling (`SearchController`)

mod controller;
mod search;

pub use controller::SearchController;
pub use search::{AlgoliaClient, StorySource, parse_hits};
