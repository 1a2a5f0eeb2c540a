//! Error types for agentrun.

pub mod unified;

pub use unified::{ApiErrorBody, ApiErrorDetails, ErrorCategory};

use thiserror::Error;

/// Primary error type for all agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Model behavior error: {0}")]
    ModelBehavior(String),

    #[error("Model refused the request: {0}")]
    Refusal(String),
}

impl AgentError {
    /// Create an API error without a provider code.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            code: None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::Network(e) if e.is_decode() => ErrorCategory::Serialization,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                408 => ErrorCategory::Timeout,
                409 => ErrorCategory::Conflict,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ModelBehavior(_) | Self::Refusal(_) => ErrorCategory::Model,
            Self::InvalidArgument(_) | Self::InvalidState(_) => ErrorCategory::Usage,
        }
    }

    /// Whether this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
                | ErrorCategory::Conflict
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentError>;
