//! Tavily search client
//!
//! Thin reqwest wrapper over the Tavily search API. Returns documents with
//! raw page content where the API provides it, falling back to the snippet.

use crate::provider::{SearchDocument, SearchProvider};
use async_trait::async_trait;
use futures::FutureExt;
use scout_core::{retry_async, search_error, ErrorContext, RetryConfig, ScoutError, ScoutResult, SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tavily-backed search provider
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_results: usize,
}

#[derive(Serialize, Clone)]
struct TavilyRequest {
    api_key: String,
    query: String,
    max_results: usize,
    include_raw_content: bool,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    raw_content: Option<String>,
}

impl TavilySearch {
    /// Create a new client from configuration, falling back to the
    /// TAVILY_API_KEY environment variable.
    pub fn new(config: &SearchConfig) -> ScoutResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("TAVILY_API_KEY").ok())
            .ok_or_else(|| ScoutError::Config {
                message: "Tavily API key not found".to_string(),
                source: None,
                context: ErrorContext::new("tavily")
                    .with_operation("new")
                    .with_suggestion("Set the TAVILY_API_KEY environment variable")
                    .with_suggestion("Or set search.api_key in the config file"),
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str) -> ScoutResult<Vec<SearchDocument>> {
        let request = TavilyRequest {
            api_key: self.api_key.clone(),
            query: query.to_string(),
            max_results: self.max_results,
            include_raw_content: true,
        };

        let client = self.client.clone();
        let url = format!("{}/search", self.base_url);

        let response = retry_async(
            move || {
                let client = client.clone();
                let url = url.clone();
                let request = request.clone();
                async move {
                    let response = client.post(&url).json(&request).send().await?;
                    response.error_for_status()
                }
                .boxed()
            },
            RetryConfig {
                max_attempts: 3,
                initial_delay_ms: 500,
                ..RetryConfig::default()
            },
            "tavily_search",
        )
        .await
        .map_err(|e| search_error!(format!("Search request failed: {}", e), "tavily", e))?;

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| search_error!(format!("Failed to decode search response: {}", e), "tavily", e))?;

        let documents: Vec<SearchDocument> = body
            .results
            .into_iter()
            .map(|result| SearchDocument {
                url: result.url,
                content: result.raw_content.unwrap_or(result.content),
            })
            .collect();

        debug!(query = query, count = documents.len(), "Search completed");
        Ok(documents)
    }
}
