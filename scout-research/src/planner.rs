//! Query planning: turning a research goal into a bounded batch of
//! distinct search queries

use crate::types::SearchQuery;
use async_trait::async_trait;
use scout_core::ScoutResult;
use scout_llm::{system_prompt, ScoutLlmClient};
use std::sync::Arc;
use tracing::{debug, info};

/// Plans the search queries explored at one recursion level
#[async_trait]
pub trait QueryPlanner: Send + Sync {
    /// Produce up to `num_queries` queries serving the given goal
    ///
    /// A structural failure of the backing model yields an empty batch,
    /// which the engine treats as "nothing left to explore" rather than an
    /// error.
    async fn plan(
        &self,
        goal: &str,
        prior_learnings: &[String],
        num_queries: usize,
    ) -> ScoutResult<Vec<SearchQuery>>;
}

/// LLM-backed query planner
pub struct LlmQueryPlanner {
    llm: Arc<ScoutLlmClient>,
}

impl LlmQueryPlanner {
    pub fn new(llm: Arc<ScoutLlmClient>) -> Self {
        Self { llm }
    }

    fn build_prompt(goal: &str, prior_learnings: &[String], num_queries: usize) -> String {
        let mut prompt = format!(
            "Given the following research goal, generate a list of search engine queries to \
             research the topic. Return up to {} queries, each covering a distinct angle of \
             the topic. Make sure the queries do not overlap semantically.\n\n\
             <goal>\n{}\n</goal>\n\n\
             Return a JSON array of objects, each with:\n\
             - \"query\": the search query text\n\
             - \"research_goal\": what this query is meant to uncover and how to advance the \
             research once it is answered",
            num_queries, goal
        );

        if !prior_learnings.is_empty() {
            prompt.push_str(
                "\n\nHere are learnings from previous research. Use them to generate more \
                 specific queries, and do not generate queries that merely restate them:\n",
            );
            for learning in prior_learnings {
                prompt.push_str(&format!("- {}\n", learning));
            }
        }

        prompt
    }
}

#[async_trait]
impl QueryPlanner for LlmQueryPlanner {
    async fn plan(
        &self,
        goal: &str,
        prior_learnings: &[String],
        num_queries: usize,
    ) -> ScoutResult<Vec<SearchQuery>> {
        debug!(num_queries, "Planning search queries");

        let prompt = Self::build_prompt(goal, prior_learnings, num_queries);
        let queries: Option<Vec<SearchQuery>> = self
            .llm
            .generate_structured(&system_prompt(), &prompt)
            .await?;

        let mut queries = queries.unwrap_or_default();
        queries.truncate(num_queries);

        info!(planned = queries.len(), "Query planning completed");
        for query in &queries {
            debug!(query = %query.query, goal = %query.research_goal, "Planned query");
        }

        Ok(queries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_goal_and_bound() {
        let prompt = LlmQueryPlanner::build_prompt("quantum error correction", &[], 4);
        assert!(prompt.contains("quantum error correction"));
        assert!(prompt.contains("up to 4 queries"));
        assert!(!prompt.contains("previous research"));
    }

    #[test]
    fn prompt_lists_prior_learnings() {
        let learnings = vec!["Surface codes dominate".to_string()];
        let prompt = LlmQueryPlanner::build_prompt("quantum error correction", &learnings, 2);
        assert!(prompt.contains("Surface codes dominate"));
        assert!(prompt.contains("previous research"));
    }
}
