//! Search provider trait and result document

use async_trait::async_trait;
use scout_core::ScoutResult;
use serde::{Deserialize, Serialize};

/// One fetched document from a search backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Source URL
    pub url: String,
    /// Extracted text content
    pub content: String,
}

/// Search backend boundary
///
/// A failed call is a recoverable, per-branch failure for the research
/// engine; implementations should map transport and decode errors to
/// `ScoutError::Search`.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Execute one query and return the fetched documents
    async fn search(&self, query: &str) -> ScoutResult<Vec<SearchDocument>>;
}
