//! LLM client integration using siumai
//!
//! This module provides a unified interface for interacting with various
//! LLM providers through the siumai framework.

use scout_core::{ErrorContext, LlmConfig, ModelStage, ScoutError, ScoutResult};
use siumai::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Unified LLM client that supports multiple providers
pub struct ScoutLlmClient {
    client: Box<dyn LlmClient>,
    provider: String,
    model: String,
}

impl ScoutLlmClient {
    /// Create a new LLM client for one pipeline stage
    pub async fn new(config: &LlmConfig, stage: ModelStage) -> ScoutResult<Self> {
        let model = config.model_for(stage).to_string();
        let client = Self::build_client(config, &model).await?;

        info!(
            "Created LLM client for provider: {} with model: {}",
            config.provider, model
        );

        Ok(Self {
            client,
            provider: config.provider.clone(),
            model,
        })
    }

    /// Build the appropriate siumai client based on configuration
    async fn build_client(config: &LlmConfig, model: &str) -> ScoutResult<Box<dyn LlmClient>> {
        match config.provider.as_str() {
            "gemini" => {
                let api_key = Self::resolve_api_key(config, "GEMINI_API_KEY")?;

                let mut builder = LlmBuilder::new()
                    .gemini()
                    .api_key(&api_key)
                    .model(model)
                    .temperature(config.temperature);

                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens as i32);
                }

                let client = builder
                    .build()
                    .await
                    .map_err(|e| Self::build_error(config, model, "Gemini", e))?;

                Ok(Box::new(client))
            }
            "openai" => {
                let api_key = Self::resolve_api_key(config, "OPENAI_API_KEY")?;

                let mut builder = LlmBuilder::new()
                    .openai()
                    .api_key(&api_key)
                    .model(model)
                    .temperature(config.temperature);

                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens);
                }

                if let Some(base_url) = &config.base_url {
                    builder = builder.base_url(base_url);
                }

                let client = builder
                    .build()
                    .await
                    .map_err(|e| Self::build_error(config, model, "OpenAI", e))?;

                Ok(Box::new(client))
            }
            "anthropic" => {
                let api_key = Self::resolve_api_key(config, "ANTHROPIC_API_KEY")?;

                let mut builder = LlmBuilder::new()
                    .anthropic()
                    .api_key(&api_key)
                    .model(model)
                    .temperature(config.temperature);

                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens);
                }

                let client = builder
                    .build()
                    .await
                    .map_err(|e| Self::build_error(config, model, "Anthropic", e))?;

                Ok(Box::new(client))
            }
            "ollama" => {
                let base_url = config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| "http://localhost:11434".to_string());

                let mut builder = LlmBuilder::new()
                    .ollama()
                    .model(model)
                    .base_url(&base_url)
                    .temperature(config.temperature);

                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens);
                }

                let client = builder
                    .build()
                    .await
                    .map_err(|e| Self::build_error(config, model, "Ollama", e))?;

                Ok(Box::new(client))
            }
            "groq" => {
                let api_key = Self::resolve_api_key(config, "GROQ_API_KEY")?;

                let mut builder = LlmBuilder::new()
                    .groq()
                    .api_key(&api_key)
                    .model(model)
                    .temperature(config.temperature);

                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens);
                }

                let client = builder
                    .build()
                    .await
                    .map_err(|e| Self::build_error(config, model, "Groq", e))?;

                Ok(Box::new(client))
            }
            provider => Err(ScoutError::Config {
                message: format!("Unsupported LLM provider: {}", provider),
                source: None,
                context: ErrorContext::new("llm_client")
                    .with_operation("build_client")
                    .with_suggestion("Use one of: gemini, openai, anthropic, ollama, groq"),
            }),
        }
    }

    fn resolve_api_key(config: &LlmConfig, env_var: &str) -> ScoutResult<String> {
        config
            .api_key
            .clone()
            .or_else(|| std::env::var(env_var).ok())
            .ok_or_else(|| ScoutError::Config {
                message: format!("{} API key not found", config.provider),
                source: None,
                context: ErrorContext::new("llm_client")
                    .with_operation("resolve_api_key")
                    .with_suggestion(&format!("Set the {} environment variable", env_var))
                    .with_suggestion("Or set llm.api_key in the config file"),
            })
    }

    fn build_error(
        config: &LlmConfig,
        model: &str,
        provider_name: &str,
        err: impl std::fmt::Display,
    ) -> ScoutError {
        ScoutError::Llm {
            message: format!("Failed to build {} client: {}", provider_name, err),
            provider: Some(config.provider.clone()),
            model: Some(model.to_string()),
            context: ErrorContext::new("llm_client").with_operation("build_client"),
        }
    }

    /// Generate a response using the LLM
    pub async fn generate(&self, messages: Vec<ChatMessage>) -> ScoutResult<String> {
        let start_time = Instant::now();

        debug!("Generating response with {} messages", messages.len());

        let response = self
            .client
            .chat(messages)
            .await
            .map_err(|e| ScoutError::Llm {
                message: format!("LLM generation failed: {}", e),
                provider: Some(self.provider.clone()),
                model: Some(self.model.clone()),
                context: ErrorContext::new("llm_client")
                    .with_operation("generate")
                    .with_suggestion("Check API key validity and provider status"),
            })?;

        let generation_time = start_time.elapsed();

        if let Some(content) = response.content_text() {
            debug!(
                "Generated response in {:?} ({} chars)",
                generation_time,
                content.len()
            );
            Ok(content.to_string())
        } else {
            Err(ScoutError::EmptyModelResponse {
                model: self.model.clone(),
                context: ErrorContext::new("llm_client").with_operation("generate"),
            })
        }
    }

    /// Generate a response with system and user messages
    pub async fn generate_with_system(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> ScoutResult<String> {
        let messages = vec![system!(system_prompt), user!(user_message)];

        self.generate(messages).await
    }

    /// Provider name this client was built for
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Model identifier this client was built for
    pub fn model(&self) -> &str {
        &self.model
    }
}
