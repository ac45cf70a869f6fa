//! Core configuration data structures

use serde::{Deserialize, Serialize};

/// Top-level Scout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// LLM provider settings
    pub llm: LlmConfig,
    /// Search provider settings
    pub search: SearchConfig,
    /// Research traversal settings
    pub research: ResearchConfig,
}

/// LLM provider configuration
///
/// One provider serves all three pipeline stages; each stage can use a
/// different model identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (gemini, openai, anthropic, ollama, groq)
    pub provider: String,
    /// Model used to generate clarifying questions
    pub feedback_model: String,
    /// Model used by the query planner and finding extractor
    pub research_model: String,
    /// Model used to write the final report
    pub reporting_model: String,
    /// API key (falls back to the provider's environment variable)
    pub api_key: Option<String>,
    /// Custom API base URL
    pub base_url: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per response
    pub max_tokens: Option<u32>,
}

/// Pipeline stage, used to pick the model identifier for a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStage {
    Feedback,
    Research,
    Reporting,
}

impl LlmConfig {
    /// Model identifier for the given pipeline stage
    pub fn model_for(&self, stage: ModelStage) -> &str {
        match stage {
            ModelStage::Feedback => &self.feedback_model,
            ModelStage::Research => &self.research_model,
            ModelStage::Reporting => &self.reporting_model,
        }
    }
}

/// Search provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API key (falls back to TAVILY_API_KEY)
    pub api_key: Option<String>,
    /// Search API base URL
    pub base_url: String,
    /// Maximum documents requested per query
    pub max_results: usize,
}

/// Research traversal configuration
///
/// The breadth-halving and depth-decrement rules are fixed; everything that
/// is a tuning heuristic rather than a correctness property lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Default breadth when not given on the command line
    pub default_breadth: usize,
    /// Default depth when not given on the command line
    pub default_depth: usize,
    /// Maximum learnings extracted per query
    pub num_learnings: usize,
    /// Maximum follow-up questions extracted per query
    pub num_follow_ups: usize,
    /// Maximum characters of each document sent to the extractor
    pub content_limit: usize,
    /// Maximum in-flight search branches at one recursion level
    pub max_concurrency: usize,
    /// Timeout applied to each outbound search call
    pub search_timeout_ms: u64,
    /// Maximum clarifying questions asked before research starts
    pub max_feedback_questions: usize,
}
