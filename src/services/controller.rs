//! Draft text vs. committed query.
//!
//! Keystrokes only change the draft (which is persisted); the committed
//! query URL changes only on an explicit, non-empty submit.

use url::Url;

use crate::error::Result;
use crate::models::Config;
use crate::storage::PersistedPreference;
use crate::utils::{build_query_url, query_term};

#[derive(Debug)]
pub struct SearchController {
    base_url: Url,
    draft: PersistedPreference,
    committed: Url,
}

impl SearchController {
    /// Start with the persisted draft committed, as the list is fetched
    /// for it straight away.
    pub fn new(base_url: &str, draft: PersistedPreference) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let committed = build_query_url(&base_url, draft.value());
        Ok(Self {
            base_url,
            draft,
            committed,
        })
    }

    pub fn from_config(config: &Config, draft: PersistedPreference) -> Result<Self> {
        Self::new(&config.api.base_url, draft)
    }

    pub fn draft(&self) -> &str {
        self.draft.value()
    }

    /// URL of the most recently committed search.
    pub fn committed(&self) -> &Url {
        &self.committed
    }

    pub fn committed_term(&self) -> String {
        query_term(&self.committed).unwrap_or_default()
    }

    /// Replace the draft text.
    pub async fn input(&mut self, text: impl Into<String>) {
        self.draft.set(text).await;
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.value().is_empty()
    }

    /// Commit the draft. Returns the new query URL, or `None` when the
    /// draft is empty and nothing was committed.
    pub fn submit(&mut self) -> Option<Url> {
        if !self.can_submit() {
            log::debug!("Ignoring submit with an empty search term");
            return None;
        }
        self.committed = build_query_url(&self.base_url, self.draft.value());
        Some(self.committed.clone())
    }

    /// Access the persisted draft.
    pub fn preference(&self) -> &PersistedPreference {
        &self.draft
    }
}
