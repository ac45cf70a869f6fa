//! Clarifying-question generation before research starts

use scout_core::ScoutResult;
use scout_llm::{system_prompt, ScoutLlmClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Generates follow-up questions that sharpen the research direction
pub struct FeedbackGenerator {
    llm: Arc<ScoutLlmClient>,
}

#[derive(Deserialize)]
struct FeedbackQuestions {
    #[serde(default)]
    questions: Vec<String>,
}

impl FeedbackGenerator {
    pub fn new(llm: Arc<ScoutLlmClient>) -> Self {
        Self { llm }
    }

    /// Ask the model for up to `max_questions` clarifying questions
    ///
    /// A structural failure yields an empty list; research proceeds with
    /// the original query alone.
    pub async fn generate_feedback(
        &self,
        query: &str,
        max_questions: usize,
    ) -> ScoutResult<Vec<String>> {
        let prompt = format!(
            "Given the following query from the user, ask follow-up questions to clarify the \
             research direction. Return up to {} questions, but feel free to return fewer if \
             the original query is clear.\n\n\
             <query>\n{}\n</query>\n\n\
             Return a JSON object with a \"questions\" array of strings.",
            max_questions, query
        );

        let parsed: Option<FeedbackQuestions> = self
            .llm
            .generate_structured(&system_prompt(), &prompt)
            .await?;

        let mut questions = parsed.map(|p| p.questions).unwrap_or_default();
        questions.truncate(max_questions);

        info!(questions = questions.len(), "Generated clarifying questions");
        Ok(questions)
    }
}

/// Combine the initial query with the clarifying Q&A into the research goal
///
/// Unanswered questions are skipped; answers beyond the question list are
/// ignored.
pub fn combine_query(query: &str, questions: &[String], answers: &[String]) -> String {
    let mut combined = format!("Initial query: {}\n", query);
    for (i, (question, answer)) in questions.iter().zip(answers.iter()).enumerate() {
        combined.push_str(&format!(
            "\n{}. Question: {}\n   Answer: {}\n",
            i + 1,
            question,
            answer
        ));
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_query_interleaves_questions_and_answers() {
        let questions = vec!["Which region?".to_string(), "What timeframe?".to_string()];
        let answers = vec!["Europe".to_string(), "Last 5 years".to_string()];
        let combined = combine_query("solar adoption", &questions, &answers);

        assert!(combined.starts_with("Initial query: solar adoption"));
        assert!(combined.contains("1. Question: Which region?"));
        assert!(combined.contains("   Answer: Europe"));
        assert!(combined.contains("2. Question: What timeframe?"));
        assert!(combined.contains("   Answer: Last 5 years"));
    }

    #[test]
    fn combine_query_without_feedback_is_just_the_query() {
        let combined = combine_query("solar adoption", &[], &[]);
        assert_eq!(combined, "Initial query: solar adoption\n");
    }

    #[test]
    fn combine_query_skips_unanswered_questions() {
        let questions = vec!["Which region?".to_string(), "What timeframe?".to_string()];
        let answers = vec!["Europe".to_string()];
        let combined = combine_query("solar adoption", &questions, &answers);
        assert!(combined.contains("Which region?"));
        assert!(!combined.contains("What timeframe?"));
    }
}
