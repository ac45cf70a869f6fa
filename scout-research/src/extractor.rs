//! Finding extraction: distilling fetched documents into learnings and
//! follow-up questions

use crate::types::{Finding, SearchQuery};
use async_trait::async_trait;
use scout_core::ScoutResult;
use scout_llm::{system_prompt, ScoutLlmClient};
use scout_search::SearchDocument;
use std::sync::Arc;
use tracing::{debug, info};

/// Extracts a bounded Finding from one query's search results
#[async_trait]
pub trait FindingExtractor: Send + Sync {
    /// Produce up to `num_learnings` learnings and `num_follow_ups`
    /// follow-up questions from the given documents
    ///
    /// A structural failure of the backing model yields an empty Finding;
    /// it never aborts the caller.
    async fn extract(
        &self,
        query: &SearchQuery,
        results: &[SearchDocument],
        num_learnings: usize,
        num_follow_ups: usize,
    ) -> ScoutResult<Finding>;
}

/// LLM-backed finding extractor
pub struct LlmFindingExtractor {
    llm: Arc<ScoutLlmClient>,
    /// Maximum characters of each document forwarded to the model
    content_limit: usize,
}

impl LlmFindingExtractor {
    pub fn new(llm: Arc<ScoutLlmClient>, content_limit: usize) -> Self {
        Self { llm, content_limit }
    }

    fn build_prompt(
        &self,
        query: &SearchQuery,
        results: &[SearchDocument],
        num_learnings: usize,
        num_follow_ups: usize,
    ) -> String {
        let excerpts: Vec<String> = results
            .iter()
            .map(|doc| {
                format!(
                    "<source url=\"{}\">\n{}\n</source>",
                    doc.url,
                    truncate_chars(&doc.content, self.content_limit)
                )
            })
            .collect();

        format!(
            "Given the following contents from a search for the query <query>{}</query> \
             (research goal: {}), generate learnings from the contents.\n\n\
             Return a JSON object with:\n\
             - \"learnings\": up to {} unique, concise, information-dense statements. Each \
             must stand on its own and should include entities, metrics, numbers or dates \
             where the contents provide them.\n\
             - \"follow_up_questions\": up to {} questions that would deepen the research.\n\n\
             <contents>\n{}\n</contents>",
            query.query,
            query.research_goal,
            num_learnings,
            num_follow_ups,
            excerpts.join("\n")
        )
    }
}

#[async_trait]
impl FindingExtractor for LlmFindingExtractor {
    async fn extract(
        &self,
        query: &SearchQuery,
        results: &[SearchDocument],
        num_learnings: usize,
        num_follow_ups: usize,
    ) -> ScoutResult<Finding> {
        if results.is_empty() {
            debug!(query = %query.query, "No documents to extract from");
            return Ok(Finding::default());
        }

        let prompt = self.build_prompt(query, results, num_learnings, num_follow_ups);
        let finding: Option<Finding> = self
            .llm
            .generate_structured(&system_prompt(), &prompt)
            .await?;

        let mut finding = finding.unwrap_or_default();
        finding.learnings.truncate(num_learnings);
        finding.follow_up_questions.truncate(num_follow_ups);

        info!(
            query = %query.query,
            learnings = finding.learnings.len(),
            follow_ups = finding.follow_up_questions.len(),
            "Finding extraction completed"
        );

        Ok(finding)
    }
}

/// Truncate to at most `limit` characters without splitting a UTF-8
/// code point.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("", 5), "");
    }
}
