//! Error classification and provider error payloads.

use serde::{Deserialize, Serialize};

/// Broad error category for routing retry logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Conflict,
    Api,
    Configuration,
    Serialization,
    Model,
    Usage,
}

/// Structured error envelope returned by the OpenAI API.
///
/// ```json
/// {"error": {"message": "...", "type": "invalid_request_error", "code": "model_not_found"}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorDetails {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, returning `None` for non-JSON or unexpected shapes.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_error_envelope() {
        let body = r#"{"error":{"message":"The model `gpt-9` does not exist","type":"invalid_request_error","param":null,"code":"model_not_found"}}"#;
        let parsed = ApiErrorBody::parse(body).unwrap();
        assert_eq!(parsed.error.message, "The model `gpt-9` does not exist");
        assert_eq!(parsed.error.kind.as_deref(), Some("invalid_request_error"));
        assert_eq!(parsed.error.code.as_deref(), Some("model_not_found"));
        assert_eq!(parsed.error.param, None);
    }

    #[test]
    fn plain_text_body_is_not_an_envelope() {
        assert!(ApiErrorBody::parse("upstream connect error").is_none());
        assert!(ApiErrorBody::parse(r#"{"detail":"nope"}"#).is_none());
    }
}
