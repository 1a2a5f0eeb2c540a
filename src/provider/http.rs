//! Shared HTTP client, headers, and status mapping for the OpenAI endpoints.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::AgentConfig;
use crate::error::{AgentError, ApiErrorBody};

/// Build a reqwest client with the configured request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AgentError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(AgentError::Network)
}

/// Build headers for an OpenAI request.
pub fn openai_headers(
    api_key: &str,
    organization: Option<&str>,
    project: Option<&str>,
) -> Result<HeaderMap, AgentError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let bearer = scoped_value("OPENAI_API_KEY", &format!("Bearer {api_key}"))?;
    headers.insert(AUTHORIZATION, bearer);
    if let Some(org) = organization {
        headers.insert("openai-organization", scoped_value("OPENAI_ORG_ID", org)?);
    }
    if let Some(project) = project {
        headers.insert("openai-project", scoped_value("OPENAI_PROJECT_ID", project)?);
    }
    let agent = format!("agentrun/{}", env!("CARGO_PKG_VERSION"));
    if let Ok(val) = HeaderValue::from_str(&agent) {
        headers.insert(USER_AGENT, val);
    }
    Ok(headers)
}

/// Header value built from an environment-supplied setting.
fn scoped_value(var: &str, value: &str) -> Result<HeaderValue, AgentError> {
    HeaderValue::from_str(value).map_err(|_| {
        AgentError::Configuration(format!("{var} contains characters not allowed in a header"))
    })
}

/// Map a non-success HTTP response to an error.
pub fn status_to_error(status: u16, headers: &HeaderMap, body: &str) -> AgentError {
    let parsed = ApiErrorBody::parse(body);
    let message = match &parsed {
        Some(envelope) => envelope.error.message.clone(),
        None if body.trim().is_empty() => reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("empty response body")
            .to_string(),
        None => body.trim().to_string(),
    };
    match status {
        401 | 403 => AgentError::Authentication(message),
        429 => AgentError::RateLimited {
            retry_after_ms: retry_after_ms(headers),
        },
        _ => AgentError::Api {
            status,
            message,
            code: parsed.and_then(|e| e.error.code),
        },
    }
}

/// Read `retry-after-ms`, falling back to `retry-after` in (fractional) seconds.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
    };
    read("retry-after-ms")
        .map(|ms| ms as u64)
        .or_else(|| read("retry-after").map(|s| (s * 1000.0) as u64))
}

/// A configured OpenAI base URL plus the client and headers to reach it.
#[derive(Debug, Clone)]
pub struct Endpoint {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl Endpoint {
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let headers = openai_headers(config.api_key()?, config.organization(), config.project())?;
        Ok(Self {
            client: build_client(config.timeout())?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            headers,
            timeout: config.timeout(),
        })
    }

    /// Client timeouts become [`AgentError::Timeout`]; other transport
    /// failures stay [`AgentError::Network`].
    fn transport_error(&self, err: reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            AgentError::Network(err)
        }
    }

    /// POST a JSON body to `{base_url}/{path}` and decode the JSON reply.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, AgentError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let resp = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        debug!(url = %url, status, bytes = text.len(), "OpenAI response received");

        if !(200..300).contains(&status) {
            return Err(status_to_error(status, &headers, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_bearer_and_optional_ids() {
        let headers = openai_headers("sk-test", Some("org-1"), None).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer sk-test");
        assert_eq!(headers["openai-organization"], "org-1");
        assert!(headers.get("openai-project").is_none());
    }

    #[test]
    fn project_id_is_sent_when_configured() {
        let headers = openai_headers("sk-test", None, Some("proj_123")).unwrap();
        assert_eq!(headers["openai-project"], "proj_123");
        assert!(headers.get("openai-organization").is_none());
    }

    #[test]
    fn ids_with_control_characters_are_rejected() {
        let err = openai_headers("sk-test", Some("org-1\r"), None).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(ref m) if m.contains("OPENAI_ORG_ID")));
        let err = openai_headers("sk-test", None, Some("proj\n1")).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(ref m) if m.contains("OPENAI_PROJECT_ID")));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let err = openai_headers("sk-\nbad", None, None).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn auth_statuses_map_to_authentication() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = status_to_error(401, &HeaderMap::new(), body);
        assert!(
            matches!(err, AgentError::Authentication(ref m) if m == "Incorrect API key provided")
        );
    }

    #[test]
    fn rate_limit_reads_retry_after_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("1.5"));
        let err = status_to_error(429, &headers, "");
        assert!(matches!(err, AgentError::RateLimited { retry_after_ms: Some(1500) }));

        headers.insert("retry-after-ms", HeaderValue::from_static("20"));
        let err = status_to_error(429, &headers, "");
        assert!(matches!(err, AgentError::RateLimited { retry_after_ms: Some(20) }));
    }

    #[test]
    fn api_error_keeps_provider_code() {
        let body = r#"{"error":{"message":"The model `gpt-9` does not exist","type":"invalid_request_error","code":"model_not_found"}}"#;
        let err = status_to_error(404, &HeaderMap::new(), body);
        match err {
            AgentError::Api { status, message, code } => {
                assert_eq!(status, 404);
                assert_eq!(message, "The model `gpt-9` does not exist");
                assert_eq!(code.as_deref(), Some("model_not_found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_body_uses_canonical_reason() {
        let err = status_to_error(503, &HeaderMap::new(), "");
        assert_eq!(err.to_string(), "API error (status 503): Service Unavailable");
    }
}
