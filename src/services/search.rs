// src/services/search.rs

//! Remote story search.
//!
//! Any transport error, non-2xx status or undecodable body is reported as
//! a single [`AppError::Fetch`]; callers do not distinguish between them.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, SearchResponse, Story};
use crate::utils::{http, query_term};

/// Anything that can resolve a committed search URL to a list of stories.
#[async_trait]
pub trait StorySource: Send + Sync {
    async fn search(&self, url: &Url) -> Result<Vec<Story>>;
}

/// Client for the Hacker News Algolia search endpoint.
#[derive(Debug, Clone)]
pub struct AlgoliaClient {
    client: Client,
}

impl AlgoliaClient {
    /// Create a client with the configured user agent and timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }
}

#[async_trait]
impl StorySource for AlgoliaClient {
    async fn search(&self, url: &Url) -> Result<Vec<Story>> {
        let query = query_term(url).unwrap_or_default();
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::fetch(&query, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(query, format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(&query, e))?;
        parse_hits(&body).map_err(|e| AppError::fetch(query, e))
    }
}

/// Decode a search response body into its hit list.
pub fn parse_hits(body: &str) -> Result<Vec<Story>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.hits)
}
