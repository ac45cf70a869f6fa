//! Structured JSON extraction from model output
//!
//! Models are instructed to answer with bare JSON, but in practice wrap it
//! in code fences or surround it with prose. Decoding goes through a
//! best-effort payload extraction first; a decode failure is recoverable
//! and surfaces as `Ok(None)` to the caller.

use crate::client::ScoutLlmClient;
use scout_core::{ErrorContext, ScoutError, ScoutResult};
use serde::de::DeserializeOwned;

/// Extract the JSON payload from model output
///
/// Strips optional ``` / ```json fences, then narrows to the outermost
/// bracket span when prose surrounds the JSON.
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();

    let body = if let Some((_, rest)) = trimmed.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = trimmed.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        trimmed
    };
    let body = body.trim();

    match body.find(['{', '[']) {
        Some(start) => {
            let close = if body.as_bytes()[start] == b'{' { '}' } else { ']' };
            match body.rfind(close) {
                Some(end) if end > start => &body[start..=end],
                _ => body,
            }
        }
        None => body,
    }
}

impl ScoutLlmClient {
    /// Request a structured object from the model
    ///
    /// The expected shape must be described in `user_prompt`. Transport and
    /// empty-response failures propagate as errors; output that cannot be
    /// decoded into `T` is logged and returned as `Ok(None)` so the caller
    /// can continue with "no structured data produced".
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> ScoutResult<Option<T>> {
        let prompt = format!(
            "{}\n\nRespond with valid JSON only. Do not include explanations or markdown fences.",
            user_prompt
        );

        let text = self.generate_with_system(system_prompt, &prompt).await?;
        let payload = extract_json_payload(&text);

        match serde_json::from_str::<T>(payload) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let err = ScoutError::Extraction {
                    message: format!("Model output did not match expected shape: {}", e),
                    context: ErrorContext::new("llm_client")
                        .with_operation("generate_structured")
                        .with_metadata("payload_prefix", &payload.chars().take(80).collect::<String>()),
                };
                err.log();
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_bare_json_through() {
        assert_eq!(extract_json_payload(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn strips_json_fences() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_payload(text), r#"{"a": 1}"#);
    }

    #[test]
    fn strips_anonymous_fences() {
        let text = "```\n[1, 2, 3]\n```";
        assert_eq!(extract_json_payload(text), "[1, 2, 3]");
    }

    #[test]
    fn narrows_to_bracket_span_inside_prose() {
        let text = "Here is the result:\n[{\"query\": \"x\"}]\nHope that helps!";
        assert_eq!(extract_json_payload(text), r#"[{"query": "x"}]"#);
    }

    #[test]
    fn leaves_non_json_untouched() {
        assert_eq!(extract_json_payload("no structure here"), "no structure here");
    }
}
