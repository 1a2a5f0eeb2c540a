//! Shared test helpers: canned OpenAI payloads, a mock provider, and runner
//! wiring against a wiremock server.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::MockServer;

use agentrun::agent::Agent;
use agentrun::config::AgentConfig;
use agentrun::error::AgentError;
use agentrun::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use agentrun::runner::Runner;
use agentrun::types::{FinishReason, Usage};
use agentrun::util::retry::RetryPolicy;

pub const HAIKU_PROMPT: &str = "Write a haiku about the OpenAI agents SDK.";

pub fn hello_agent() -> Agent {
    Agent::new("Assistant", "You are a helpful assistant")
}

pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(1),
        multiplier: 1.0,
    }
}

pub fn test_config(server: &MockServer) -> AgentConfig {
    AgentConfig::new()
        .with_api_key("test-key")
        .with_base_url(server.uri())
}

pub fn test_runner(server: &MockServer) -> Runner {
    Runner::new(test_config(server)).with_retry_policy(fast_retry(3))
}

/// A completed Responses API payload with one output message.
pub fn responses_payload(text: &str) -> serde_json::Value {
    json!({
        "id": "resp_test_1",
        "object": "response",
        "status": "completed",
        "model": "gpt-4.1",
        "output": [{
            "type": "message",
            "id": "msg_1",
            "status": "completed",
            "role": "assistant",
            "content": [{"type": "output_text", "text": text, "annotations": []}]
        }],
        "usage": {
            "input_tokens": 24,
            "output_tokens": 17,
            "total_tokens": 41,
            "input_tokens_details": {"cached_tokens": 0},
            "output_tokens_details": {"reasoning_tokens": 0}
        }
    })
}

/// A Chat Completions payload with one choice.
pub fn chat_payload(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test-1",
        "object": "chat.completion",
        "model": "gpt-4.1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text, "refusal": null},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 30, "completion_tokens": 12, "total_tokens": 42}
    })
}

/// A provider that replays queued responses and records requests.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<Vec<ProviderResponse>>,
    pub requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(ProviderResponse {
            response_id: Some("mock-1".to_string()),
            text: text.to_string(),
            refusal: None,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
                ..Default::default()
            },
            finish_reason: Some(FinishReason::Stop),
        });
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<ProviderResponse, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(AgentError::InvalidState("no queued mock response".into()));
        }
        Ok(responses.remove(0))
    }
}
