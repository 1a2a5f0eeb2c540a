//! OpenAI Chat Completions API provider (`POST /chat/completions`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AgentError;
use crate::models::OpenAiModel;
use crate::types::*;

use super::http::Endpoint;
use super::{validate_sampling, ModelProvider, ProviderRequest, ProviderResponse};

pub struct OpenAiChatProvider {
    model: OpenAiModel,
    endpoint: Endpoint,
}

impl OpenAiChatProvider {
    pub fn new(model: OpenAiModel, endpoint: Endpoint) -> Self {
        Self { model, endpoint }
    }

    fn build_request_body(&self, request: &ProviderRequest) -> Value {
        let system = request
            .instructions
            .as_deref()
            .filter(|i| !i.is_empty())
            .map(ModelMessage::system);
        let messages: Vec<Value> = system
            .iter()
            .chain(request.input.iter())
            .map(|m| serde_json::json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut obj = Map::new();
        obj.insert("model".into(), self.model.as_str().into());
        obj.insert("messages".into(), messages.into());
        obj.insert("stream".into(), false.into());

        let settings = &request.settings;
        if let Some(max) = settings.max_tokens {
            let key = if self.model.needs_reasoning() {
                "max_completion_tokens"
            } else {
                "max_tokens"
            };
            obj.insert(key.into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = settings.top_p {
            obj.insert("top_p".into(), top_p.into());
        }
        if let Some(fp) = settings.frequency_penalty {
            obj.insert("frequency_penalty".into(), fp.into());
        }
        if let Some(pp) = settings.presence_penalty {
            obj.insert("presence_penalty".into(), pp.into());
        }
        if self.model.needs_reasoning() {
            if let Some(effort) = settings.reasoning_effort {
                obj.insert("reasoning_effort".into(), effort.to_string().into());
            }
        }
        if let Some(store) = settings.store {
            obj.insert("store".into(), store.into());
        }
        if let Some(ref metadata) = settings.metadata {
            obj.insert("metadata".into(), serde_json::json!(metadata));
        }
        if let Some(ref user) = settings.user {
            obj.insert("user".into(), user.clone().into());
        }

        Value::Object(obj)
    }

    fn parse_response(data: ChatResponse) -> Result<ProviderResponse, AgentError> {
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::ModelBehavior("No choices in OpenAI response".into()))?;

        Ok(ProviderResponse {
            response_id: data.id,
            text: choice.message.content.unwrap_or_default(),
            refusal: choice.message.refusal,
            usage: data.usage.map(ChatUsage::into_usage).unwrap_or_default(),
            finish_reason: choice.finish_reason.as_deref().and_then(parse_finish_reason),
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAiChatProvider {
    fn provider_name(&self) -> &str {
        "openai-chat"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<ProviderResponse, AgentError> {
        validate_sampling(&self.model, &request.settings)?;
        let body = self.build_request_body(request);

        debug!(model = self.model.as_str(), "OpenAI chat completion");

        let data: ChatResponse = self.endpoint.post_json("chat/completions", &body).await?;
        Self::parse_response(data)
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" | "function_call" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

// Chat Completions payload types (internal)

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: Option<u32>,
    #[serde(default)]
    prompt_tokens_details: Option<PromptTokensDetails>,
    #[serde(default)]
    completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Deserialize)]
struct PromptTokensDetails {
    #[serde(default)]
    cached_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct CompletionTokensDetails {
    #[serde(default)]
    reasoning_tokens: Option<u32>,
}

impl ChatUsage {
    fn into_usage(self) -> Usage {
        Usage {
            input_tokens: self.prompt_tokens,
            output_tokens: self.completion_tokens,
            total_tokens: self
                .total_tokens
                .unwrap_or(self.prompt_tokens.saturating_add(self.completion_tokens)),
            cached_tokens: self.prompt_tokens_details.and_then(|d| d.cached_tokens),
            reasoning_tokens: self.completion_tokens_details.and_then(|d| d.reasoning_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use pretty_assertions::assert_eq;

    fn provider(model: OpenAiModel) -> OpenAiChatProvider {
        let config = AgentConfig::new().with_api_key("test-key");
        OpenAiChatProvider::new(model, Endpoint::from_config(&config).unwrap())
    }

    #[test]
    fn instructions_become_leading_system_message() {
        let request = ProviderRequest {
            instructions: Some("You are a helpful assistant".to_string()),
            input: vec![ModelMessage::user("hello")],
            settings: ModelSettings::builder().frequency_penalty(0.5).build(),
        };
        let body = provider(OpenAiModel::Gpt4oMini).build_request_body(&request);
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant"},
                    {"role": "user", "content": "hello"}
                ],
                "stream": false,
                "frequency_penalty": 0.5,
            })
        );
    }

    #[test]
    fn reasoning_effort_only_sent_to_reasoning_models() {
        let request = ProviderRequest {
            instructions: None,
            input: vec![ModelMessage::user("hello")],
            settings: ModelSettings::builder()
                .reasoning_effort(ReasoningEffort::High)
                .build(),
        };
        let o3 = provider(OpenAiModel::O3).build_request_body(&request);
        assert_eq!(o3["reasoning_effort"], "high");
        let gpt4o = provider(OpenAiModel::Gpt4o).build_request_body(&request);
        assert!(gpt4o.get("reasoning_effort").is_none());
    }

    #[test]
    fn reasoning_models_use_max_completion_tokens() {
        let request = ProviderRequest {
            instructions: None,
            input: vec![ModelMessage::user("hello")],
            settings: ModelSettings::builder().max_tokens(64).build(),
        };
        let o3 = provider(OpenAiModel::O3).build_request_body(&request);
        assert_eq!(o3["max_completion_tokens"], 64);
        assert!(o3.get("max_tokens").is_none());

        let gpt41 = provider(OpenAiModel::Gpt41).build_request_body(&request);
        assert_eq!(gpt41["max_tokens"], 64);
        assert!(gpt41.get("max_completion_tokens").is_none());
    }

    #[tokio::test]
    async fn penalties_on_reasoning_models_fail_before_sending() {
        let request = ProviderRequest {
            instructions: None,
            input: vec![ModelMessage::user("hello")],
            settings: ModelSettings::builder()
                .max_tokens(64)
                .frequency_penalty(0.5)
                .build(),
        };
        let err = provider(OpenAiModel::O3).generate(&request).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidArgument(_)));
    }

    #[test]
    fn response_reads_first_choice() {
        let data: ChatResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there.", "refusal": null},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }))
        .unwrap();

        let parsed = OpenAiChatProvider::parse_response(data).unwrap();
        assert_eq!(parsed.response_id.as_deref(), Some("chatcmpl-1"));
        assert_eq!(parsed.text, "Hello there.");
        assert_eq!(parsed.refusal, None);
        assert_eq!(parsed.finish_reason, Some(FinishReason::Stop));
        assert_eq!(parsed.usage.total_tokens, 15);
    }

    #[test]
    fn empty_choices_is_a_model_error() {
        let data: ChatResponse =
            serde_json::from_value(serde_json::json!({"id": "x", "choices": []})).unwrap();
        let err = OpenAiChatProvider::parse_response(data).unwrap_err();
        assert!(matches!(err, AgentError::ModelBehavior(_)));
    }
}
