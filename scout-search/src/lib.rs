//! Scout Search - Search provider boundary
//!
//! Defines the `SearchProvider` trait the research engine fans out over,
//! plus a Tavily-backed implementation.

pub mod provider;
pub mod tavily;

pub use provider::{SearchDocument, SearchProvider};
pub use tavily::TavilySearch;
