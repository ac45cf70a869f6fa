//! Shared stub collaborators for research engine tests

use async_trait::async_trait;
use scout_core::{search_error, ErrorContext, ResearchConfig, ScoutError, ScoutResult};
use scout_research::{Finding, FindingExtractor, QueryPlanner, SearchQuery};
use scout_search::{SearchDocument, SearchProvider};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn query(text: &str, goal: &str) -> SearchQuery {
    SearchQuery {
        query: text.to_string(),
        research_goal: goal.to_string(),
    }
}

pub fn test_config() -> ResearchConfig {
    ResearchConfig {
        default_breadth: 2,
        default_depth: 2,
        num_learnings: 3,
        num_follow_ups: 1,
        content_limit: 1000,
        max_concurrency: 4,
        search_timeout_ms: 1000,
        max_feedback_questions: 3,
    }
}

/// Planner returning scripted batches, one per call, in order
pub struct PlannerStub {
    batches: Mutex<VecDeque<Vec<SearchQuery>>>,
    /// num_queries passed to each call, in call order
    pub requested: Mutex<Vec<usize>>,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
}

impl PlannerStub {
    pub fn new(batches: Vec<Vec<SearchQuery>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            requested: Mutex::new(Vec::new()),
            fail_on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail the call with the given zero-based index with an LLM error
    pub fn failing_on(batches: Vec<Vec<SearchQuery>>, call_index: usize) -> Self {
        Self {
            fail_on_call: Some(call_index),
            ..Self::new(batches)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryPlanner for PlannerStub {
    async fn plan(
        &self,
        _goal: &str,
        _prior_learnings: &[String],
        num_queries: usize,
    ) -> ScoutResult<Vec<SearchQuery>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(num_queries);

        if self.fail_on_call == Some(call) {
            return Err(ScoutError::Llm {
                message: "stub model unavailable".to_string(),
                provider: None,
                model: None,
                context: ErrorContext::new("tests"),
            });
        }

        let mut batch = self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        batch.truncate(num_queries);
        Ok(batch)
    }
}

/// Search backend returning deterministic documents per query
pub struct SearchStub {
    calls: AtomicUsize,
    fail_for: Option<String>,
    results_per_query: usize,
}

impl SearchStub {
    pub fn new(results_per_query: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_for: None,
            results_per_query,
        }
    }

    /// Fail exactly the query with the given text
    pub fn failing_for(text: &str, results_per_query: usize) -> Self {
        Self {
            fail_for: Some(text.to_string()),
            ..Self::new(results_per_query)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for SearchStub {
    async fn search(&self, query: &str) -> ScoutResult<Vec<SearchDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_for.as_deref() == Some(query) {
            return Err(search_error!("stub provider failure", "tests"));
        }

        Ok((0..self.results_per_query)
            .map(|i| SearchDocument {
                url: format!("https://example.com/{}/{}", query.replace(' ', "-"), i),
                content: format!("Document {} about {}", i, query),
            })
            .collect())
    }
}

/// Extractor producing one learning per query, plus scripted follow-ups
pub struct ExtractorStub {
    calls: AtomicUsize,
    fixed_learning: Option<String>,
    follow_ups: Vec<String>,
}

impl ExtractorStub {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fixed_learning: None,
            follow_ups: Vec::new(),
        }
    }

    /// Return the same learning text for every query
    pub fn fixed(learning: &str) -> Self {
        Self {
            fixed_learning: Some(learning.to_string()),
            ..Self::new()
        }
    }

    pub fn with_follow_ups(follow_ups: Vec<String>) -> Self {
        Self {
            follow_ups,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FindingExtractor for ExtractorStub {
    async fn extract(
        &self,
        query: &SearchQuery,
        _results: &[SearchDocument],
        num_learnings: usize,
        num_follow_ups: usize,
    ) -> ScoutResult<Finding> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let learning = self
            .fixed_learning
            .clone()
            .unwrap_or_else(|| format!("Learning from {}", query.query));

        let mut finding = Finding {
            learnings: vec![learning],
            follow_up_questions: self.follow_ups.clone(),
        };
        finding.learnings.truncate(num_learnings);
        finding.follow_up_questions.truncate(num_follow_ups);
        Ok(finding)
    }
}
