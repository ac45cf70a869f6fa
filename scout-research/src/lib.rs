//! Deep research engine for iterative topic exploration
//!
//! This module provides the core research capabilities:
//! - Generate clarifying questions to sharpen the research direction
//! - Plan bounded batches of search queries per recursion level
//! - Extract learnings and follow-up questions from fetched documents
//! - Drive the breadth/depth-bounded recursive traversal with per-branch
//!   failure isolation
//! - Synthesize the accumulated learnings into a final report

pub mod engine;
pub mod extractor;
pub mod feedback;
pub mod planner;
pub mod synthesizer;
pub mod types;

pub use engine::ResearchEngine;
pub use extractor::{FindingExtractor, LlmFindingExtractor};
pub use feedback::{combine_query, FeedbackGenerator};
pub use planner::{LlmQueryPlanner, QueryPlanner};
pub use synthesizer::ReportSynthesizer;
pub use types::*;
