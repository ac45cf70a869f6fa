//! Scout LLM - Model gateway for the research pipeline
//!
//! Wraps the siumai framework behind two operations: a free-text call and a
//! structured-JSON call whose decode failures are recoverable.

pub mod client;
pub mod prompts;
pub mod structured;

pub use client::ScoutLlmClient;
pub use prompts::system_prompt;
pub use structured::extract_json_payload;
