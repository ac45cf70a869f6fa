//! Final report synthesis from accumulated learnings

use scout_core::ScoutResult;
use scout_llm::{system_prompt, ScoutLlmClient};
use std::sync::Arc;
use tracing::info;

/// Turns the final accumulator into a formatted Markdown report
pub struct ReportSynthesizer {
    llm: Arc<ScoutLlmClient>,
}

impl ReportSynthesizer {
    pub fn new(llm: Arc<ScoutLlmClient>) -> Self {
        Self { llm }
    }

    /// Write the final report for the user's combined prompt
    ///
    /// One model call over all learnings; the visited sources are appended
    /// afterwards so they are never lost to the model's formatting.
    pub async fn write_final_report(
        &self,
        prompt: &str,
        learnings: &[String],
        visited_urls: &[String],
    ) -> ScoutResult<String> {
        info!(
            learnings = learnings.len(),
            sources = visited_urls.len(),
            "Writing final report"
        );

        let user_prompt = format!(
            "Given the following prompt from the user, write a final report on the topic using \
             the learnings from research. Return a detailed Markdown report of 3 or more pages. \
             Include ALL the learnings from the research:\n\n\
             <prompt>\n{}\n</prompt>\n\n\
             Here are all the learnings from the research:\n\n{}",
            prompt,
            render_learnings(learnings)
        );

        let mut report = self
            .llm
            .generate_with_system(&system_prompt(), &user_prompt)
            .await?;

        report.push_str(&render_sources(visited_urls));
        Ok(report)
    }
}

fn render_learnings(learnings: &[String]) -> String {
    let tagged: Vec<String> = learnings
        .iter()
        .map(|learning| format!("<learning>\n{}\n</learning>", learning))
        .collect();
    format!("<learnings>\n{}\n</learnings>", tagged.join("\n"))
}

fn render_sources(visited_urls: &[String]) -> String {
    let mut section = String::from("\n\n## Sources\n\n");
    for url in visited_urls {
        section.push_str(&format!("- {}\n", url));
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learnings_are_individually_tagged() {
        let learnings = vec!["fact one".to_string(), "fact two".to_string()];
        let rendered = render_learnings(&learnings);
        assert_eq!(rendered.matches("<learning>").count(), 2);
        assert!(rendered.contains("fact one"));
        assert!(rendered.contains("fact two"));
    }

    #[test]
    fn sources_section_lists_every_url() {
        let urls = vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
        ];
        let section = render_sources(&urls);
        assert!(section.starts_with("\n\n## Sources"));
        assert!(section.contains("- https://example.com/a\n"));
        assert!(section.contains("- https://example.com/b\n"));
    }
}
