//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type ScoutResult<T> = Result<T, ScoutError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the Scout system
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Structural misuse of the research entry point: breadth below 1.
    /// Raised synchronously before any external call is made.
    #[error("Invalid research budget: breadth={breadth}, depth={depth}")]
    InvalidBudget {
        breadth: usize,
        depth: usize,
        context: ErrorContext,
    },

    #[error("Search provider error: {message}")]
    Search {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
        model: Option<String>,
        context: ErrorContext,
    },

    #[error("LLM returned no text content (model: {model})")]
    EmptyModelResponse {
        model: String,
        context: ErrorContext,
    },

    /// Model output could not be decoded into the requested structure.
    /// Callers treat this as "no structured data produced", never as fatal.
    #[error("Structured extraction failed: {message}")]
    Extraction {
        message: String,
        context: ErrorContext,
    },

    #[error("Operation timeout: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },
}

impl ScoutError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ScoutError::InvalidBudget { context, .. } => Some(context),
            ScoutError::Search { context, .. } => Some(context),
            ScoutError::Llm { context, .. } => Some(context),
            ScoutError::EmptyModelResponse { context, .. } => Some(context),
            ScoutError::Extraction { context, .. } => Some(context),
            ScoutError::Timeout { context, .. } => Some(context),
            ScoutError::Config { context, .. } => Some(context),
            ScoutError::Internal { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Check if error is recoverable
    ///
    /// Recoverable errors are isolated at the branch boundary of the
    /// research traversal and converted into "no contribution"; everything
    /// else propagates to the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScoutError::Search { .. } => true,
            ScoutError::Timeout { .. } => true,
            ScoutError::EmptyModelResponse { .. } => true,
            ScoutError::Extraction { .. } => true,
            ScoutError::InvalidBudget { .. } => false,
            ScoutError::Llm { .. } => false,
            ScoutError::Config { .. } => false,
            _ => false,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        if self.is_recoverable() {
            warn!(
                error_id = ?self.context().map(|c| &c.error_id),
                error = %self,
                "Recoverable error (branch will be skipped)"
            );
        } else {
            error!(
                error_id = ?self.context().map(|c| &c.error_id),
                error = %self,
                "Error occurred"
            );
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! search_error {
    ($msg:expr, $component:expr) => {
        $crate::ScoutError::Search {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check network connectivity")
                .with_suggestion("Verify the search API key"),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::ScoutError::Search {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check network connectivity")
                .with_suggestion("Verify the search API key"),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::ScoutError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'scout config --init' to create default config"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_classification() {
        let search = search_error!("provider down", "tests");
        assert!(search.is_recoverable());

        let budget = ScoutError::InvalidBudget {
            breadth: 0,
            depth: 2,
            context: ErrorContext::new("tests"),
        };
        assert!(!budget.is_recoverable());

        let extraction = ScoutError::Extraction {
            message: "not json".to_string(),
            context: ErrorContext::new("tests"),
        };
        assert!(extraction.is_recoverable());
    }

    #[test]
    fn context_builder_accumulates() {
        let context = ErrorContext::new("tests")
            .with_operation("unit")
            .with_metadata("key", "value")
            .with_suggestion("retry");

        assert_eq!(context.component, "tests");
        assert_eq!(context.operation.as_deref(), Some("unit"));
        assert_eq!(context.metadata.get("key").map(String::as_str), Some("value"));
        assert_eq!(context.recovery_suggestions.len(), 1);
    }
}
