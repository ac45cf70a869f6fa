//! Configuration loading and validation

use crate::error::{ErrorContext, ScoutError, ScoutResult};
use crate::types::{LlmConfig, ResearchConfig, ScoutConfig, SearchConfig};
use std::path::{Path, PathBuf};

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: "gemini".to_string(),
                feedback_model: "gemini-1.5-flash".to_string(),
                research_model: "gemini-1.5-flash".to_string(),
                reporting_model: "gemini-1.5-flash".to_string(),
                api_key: None,
                base_url: None,
                temperature: 0.7,
                max_tokens: Some(4000),
            },
            search: SearchConfig {
                api_key: None,
                base_url: "https://api.tavily.com".to_string(),
                max_results: 5,
            },
            research: ResearchConfig {
                default_breadth: 2,
                default_depth: 2,
                num_learnings: 3,
                num_follow_ups: 1,
                content_limit: 25_000,
                max_concurrency: 2,
                search_timeout_ms: 30_000,
                max_feedback_questions: 3,
            },
        }
    }
}

impl ScoutConfig {
    /// Default config file location (~/.config/scout/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scout").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScoutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScoutError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ScoutConfig = toml::from_str(&content).map_err(|e| ScoutError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ScoutResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ScoutError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| ScoutError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ScoutResult<()> {
        if self.research.default_breadth == 0 {
            return Err(ScoutError::Config {
                message: "research.default_breadth must be at least 1".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set research.default_breadth to a positive value"),
            });
        }

        if self.research.num_learnings == 0 {
            return Err(ScoutError::Config {
                message: "research.num_learnings must be at least 1".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set research.num_learnings to a positive value"),
            });
        }

        if self.research.max_concurrency == 0 {
            return Err(ScoutError::Config {
                message: "research.max_concurrency must be at least 1".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set research.max_concurrency to a positive value"),
            });
        }

        if self.research.content_limit == 0 {
            return Err(ScoutError::Config {
                message: "research.content_limit must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set research.content_limit to a positive value"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ScoutConfig::default().validate().unwrap();
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ScoutConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        config.save_to_file(&path).unwrap();
        let loaded = ScoutConfig::from_file(&path).unwrap();

        assert_eq!(loaded.llm.provider, config.llm.provider);
        assert_eq!(loaded.llm.research_model, config.llm.research_model);
        assert_eq!(loaded.research.default_breadth, config.research.default_breadth);
        assert_eq!(loaded.search.base_url, config.search.base_url);
    }

    #[test]
    fn zero_breadth_fails_validation() {
        let mut config = ScoutConfig::default();
        config.research.default_breadth = 0;
        assert!(config.validate().is_err());
    }
}
