//! The research engine: a breadth/depth-bounded recursive traversal with
//! per-branch failure isolation
//!
//! Each level plans up to `breadth` queries, fans out over them with a
//! bounded degree of concurrency, extracts a Finding per query, and
//! recurses on each branch's follow-up questions with a halved breadth and
//! decremented depth. Branch failures are swallowed at the branch boundary;
//! only budget misuse or a failure of the top-level planning call aborts
//! the run.

use crate::extractor::FindingExtractor;
use crate::planner::QueryPlanner;
use crate::types::{Budget, Finding, ResearchAccumulator, SearchQuery};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use scout_core::{with_timeout, RateLimiter, ResearchConfig, ScoutResult};
use scout_search::SearchProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Deep research engine driving the breadth/depth exploration
pub struct ResearchEngine {
    /// Query planner for each recursion level
    planner: Arc<dyn QueryPlanner>,
    /// Finding extractor applied to each query's results
    extractor: Arc<dyn FindingExtractor>,
    /// Search backend
    search: Arc<dyn SearchProvider>,
    /// Traversal tuning knobs
    config: ResearchConfig,
    /// Shared gate for outbound search calls
    limiter: Arc<RateLimiter>,
}

impl ResearchEngine {
    /// Create a new research engine
    pub fn new(
        planner: Arc<dyn QueryPlanner>,
        extractor: Arc<dyn FindingExtractor>,
        search: Arc<dyn SearchProvider>,
        config: ResearchConfig,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.max_concurrency.max(1), 0));
        Self {
            planner,
            extractor,
            search,
            config,
            limiter,
        }
    }

    /// Run the full research traversal for a goal
    ///
    /// The only externally consumed operation of this engine. Validates the
    /// budget, then explores from an empty accumulator; whatever learnings
    /// were gathered survive partial failures along the way.
    pub async fn deep_research(
        &self,
        goal: &str,
        budget: Budget,
    ) -> ScoutResult<ResearchAccumulator> {
        budget.validate()?;

        info!(
            breadth = budget.breadth,
            depth = budget.depth,
            "Starting deep research"
        );

        let result = self
            .research(goal.to_string(), budget, ResearchAccumulator::default())
            .await?;

        info!(
            learnings = result.learnings.len(),
            urls = result.visited_urls.len(),
            "Deep research completed"
        );

        Ok(result)
    }

    /// One recursion level: plan, fan out, fan in
    ///
    /// Boxed because the future recurses through `run_branch`.
    fn research(
        &self,
        goal: String,
        budget: Budget,
        accumulator: ResearchAccumulator,
    ) -> BoxFuture<'_, ScoutResult<ResearchAccumulator>> {
        async move {
            if budget.depth == 0 {
                debug!("Depth exhausted, returning accumulator");
                return Ok(accumulator);
            }

            let queries = self
                .planner
                .plan(&goal, &accumulator.learnings, budget.breadth)
                .await?;

            if queries.is_empty() {
                debug!("Planner produced no queries, treating level as terminal");
                return Ok(accumulator);
            }

            let fanout = budget.breadth.min(self.config.max_concurrency).max(1);
            let branches: Vec<ScoutResult<ResearchAccumulator>> = stream::iter(
                queries
                    .into_iter()
                    .map(|query| self.run_branch(goal.clone(), query, budget, accumulator.clone())),
            )
            .buffer_unordered(fanout)
            .collect()
            .await;

            let mut merged = accumulator;
            for branch in branches {
                match branch {
                    Ok(contribution) => merged.merge(contribution),
                    // A failed branch contributes nothing; its siblings and
                    // this level keep their progress.
                    Err(err) => err.log(),
                }
            }

            Ok(merged)
        }
        .boxed()
    }

    /// One branch: search, extract, recurse
    async fn run_branch(
        &self,
        goal: String,
        query: SearchQuery,
        budget: Budget,
        seed: ResearchAccumulator,
    ) -> ScoutResult<ResearchAccumulator> {
        let documents = {
            let _guard = self.limiter.acquire().await?;
            with_timeout(
                self.search.search(&query.query),
                self.config.search_timeout_ms,
                "search",
            )
            .await??
        };

        let mut accumulator = seed;
        for doc in &documents {
            accumulator.add_url(doc.url.clone());
        }

        let finding = if documents.is_empty() {
            // The provider call succeeded but found nothing; the branch
            // contributes no learnings and recurses on its goal alone.
            Finding::default()
        } else {
            self.extractor
                .extract(
                    &query,
                    &documents,
                    self.config.num_learnings,
                    self.config.num_follow_ups,
                )
                .await?
        };

        for learning in &finding.learnings {
            accumulator.add_learning(learning.clone());
        }

        info!(
            query = %query.query,
            documents = documents.len(),
            learnings = finding.learnings.len(),
            "Research branch completed"
        );

        let next_goal = compose_next_goal(&goal, &query.research_goal, &finding.follow_up_questions);

        // A failure anywhere in the subtree is isolated here: the branch
        // keeps the learnings it gathered at this level.
        match self
            .research(next_goal, budget.next(), accumulator.clone())
            .await
        {
            Ok(extended) => Ok(extended),
            Err(err) => {
                err.log();
                Ok(accumulator)
            }
        }
    }
}

/// Compose the goal for the next recursion level from the current goal,
/// the branch's research goal, and its follow-up questions. Deterministic
/// and includes every follow-up question.
fn compose_next_goal(goal: &str, research_goal: &str, follow_ups: &[String]) -> String {
    let mut next = format!("{}\n\nPrevious research goal: {}", goal, research_goal);
    if !follow_ups.is_empty() {
        next.push_str("\nFollow-up research directions:");
        for question in follow_ups {
            next.push_str(&format!("\n- {}", question));
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_goal_includes_all_follow_ups() {
        let follow_ups = vec!["How is it funded?".to_string(), "Who regulates it?".to_string()];
        let next = compose_next_goal("EV recycling", "market structure", &follow_ups);
        assert!(next.contains("EV recycling"));
        assert!(next.contains("market structure"));
        assert!(next.contains("How is it funded?"));
        assert!(next.contains("Who regulates it?"));
    }

    #[test]
    fn next_goal_without_follow_ups_is_stable() {
        let a = compose_next_goal("goal", "sub", &[]);
        let b = compose_next_goal("goal", "sub", &[]);
        assert_eq!(a, b);
        assert!(!a.contains("Follow-up"));
    }
}
