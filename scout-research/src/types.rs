//! Types for the deep research traversal

use scout_core::{ErrorContext, ScoutError, ScoutResult};
use serde::{Deserialize, Serialize};

/// Breadth/depth budget for one research call
///
/// Breadth is the maximum number of queries explored at one recursion
/// level; depth is the number of recursion levels remaining. A call with
/// depth 0 performs no further recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub breadth: usize,
    pub depth: usize,
}

impl Budget {
    pub fn new(breadth: usize, depth: usize) -> Self {
        Self { breadth, depth }
    }

    /// Check the entry precondition: breadth must be at least 1
    pub fn validate(&self) -> ScoutResult<()> {
        if self.breadth == 0 {
            return Err(ScoutError::InvalidBudget {
                breadth: self.breadth,
                depth: self.depth,
                context: ErrorContext::new("research")
                    .with_operation("validate_budget")
                    .with_suggestion("Use a breadth of at least 1"),
            });
        }
        Ok(())
    }

    /// Budget for the next recursion level: breadth halves rounding up
    /// (never below 1), depth decreases by one. Depth strictly decreasing
    /// is what guarantees termination.
    pub fn next(&self) -> Self {
        Self {
            breadth: self.breadth.div_ceil(2).max(1),
            depth: self.depth.saturating_sub(1),
        }
    }
}

/// One planned search request, tied to the research goal it serves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search engine query text
    pub query: String,
    /// What this query is meant to uncover
    #[serde(default, alias = "researchGoal")]
    pub research_goal: String,
}

/// Learnings and follow-up questions extracted for one query
///
/// The default (empty) value doubles as the recoverable-failure result:
/// an extraction that produced nothing never aborts the traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default, alias = "followUpQuestions")]
    pub follow_up_questions: Vec<String>,
}

/// The aggregate threaded through the research traversal
///
/// Learnings and URLs are deduplicated by exact string equality with
/// insertion order preserved. Each branch works on its own clone seeded
/// from the parent; clones are merged back at fan-in, so no accumulator is
/// ever shared mutably across concurrent branches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchAccumulator {
    pub learnings: Vec<String>,
    pub visited_urls: Vec<String>,
}

impl ResearchAccumulator {
    /// Record a learning; returns false if it was already present
    pub fn add_learning(&mut self, learning: String) -> bool {
        if self.learnings.contains(&learning) {
            return false;
        }
        self.learnings.push(learning);
        true
    }

    /// Record a visited URL; returns false if it was already present
    pub fn add_url(&mut self, url: String) -> bool {
        if self.visited_urls.contains(&url) {
            return false;
        }
        self.visited_urls.push(url);
        true
    }

    /// Set-union merge of another accumulator into this one
    pub fn merge(&mut self, other: ResearchAccumulator) {
        for learning in other.learnings {
            self.add_learning(learning);
        }
        for url in other.visited_urls {
            self.add_url(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_halves_breadth_and_decrements_depth() {
        let budget = Budget::new(4, 3);
        let next = budget.next();
        assert_eq!(next, Budget::new(2, 2));
        assert_eq!(next.next(), Budget::new(1, 1));
        // breadth floors at 1 even as depth keeps falling
        assert_eq!(next.next().next(), Budget::new(1, 0));
        assert_eq!(Budget::new(3, 2).next(), Budget::new(2, 1));
    }

    #[test]
    fn budget_rejects_zero_breadth() {
        assert!(Budget::new(0, 2).validate().is_err());
        assert!(Budget::new(1, 0).validate().is_ok());
    }

    #[test]
    fn accumulator_deduplicates_exact_strings() {
        let mut acc = ResearchAccumulator::default();
        assert!(acc.add_learning("Revenue grew 12% in Q3".to_string()));
        assert!(!acc.add_learning("Revenue grew 12% in Q3".to_string()));
        // near-duplicates are kept
        assert!(acc.add_learning("Revenue grew 12% in Q3.".to_string()));
        assert_eq!(acc.learnings.len(), 2);
    }

    #[test]
    fn merge_is_union_preserving_receiver_order() {
        let mut left = ResearchAccumulator::default();
        left.add_learning("a".to_string());
        left.add_learning("b".to_string());
        left.add_url("https://example.com/1".to_string());

        let mut right = ResearchAccumulator::default();
        right.add_learning("b".to_string());
        right.add_learning("c".to_string());
        right.add_url("https://example.com/1".to_string());
        right.add_url("https://example.com/2".to_string());

        left.merge(right);
        assert_eq!(left.learnings, vec!["a", "b", "c"]);
        assert_eq!(
            left.visited_urls,
            vec!["https://example.com/1", "https://example.com/2"]
        );
    }

    #[test]
    fn finding_decodes_camel_case_aliases() {
        let finding: Finding = serde_json::from_str(
            r#"{"learnings": ["x"], "followUpQuestions": ["y?"]}"#,
        )
        .unwrap();
        assert_eq!(finding.learnings, vec!["x"]);
        assert_eq!(finding.follow_up_questions, vec!["y?"]);
    }
}
