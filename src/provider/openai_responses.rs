//! OpenAI Responses API provider (`POST /responses`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AgentError;
use crate::models::OpenAiModel;
use crate::types::*;

use super::http::Endpoint;
use super::{validate_sampling, ModelProvider, ProviderRequest, ProviderResponse};

pub struct OpenAiResponsesProvider {
    model: OpenAiModel,
    endpoint: Endpoint,
}

impl OpenAiResponsesProvider {
    pub fn new(model: OpenAiModel, endpoint: Endpoint) -> Self {
        Self { model, endpoint }
    }

    fn build_request_body(&self, request: &ProviderRequest) -> Value {
        let input: Vec<Value> = request
            .input
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            })
            .collect();

        let mut obj = Map::new();
        obj.insert("model".into(), self.model.as_str().into());
        if let Some(instructions) = request.instructions.as_deref() {
            if !instructions.is_empty() {
                obj.insert("instructions".into(), instructions.into());
            }
        }
        obj.insert("input".into(), input.into());
        obj.insert("stream".into(), false.into());

        let settings = &request.settings;
        if let Some(max) = settings.max_tokens {
            obj.insert("max_output_tokens".into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = settings.top_p {
            obj.insert("top_p".into(), top_p.into());
        }

        if self.model.needs_reasoning() {
            let effort = settings.reasoning_effort.unwrap_or(ReasoningEffort::Medium);
            obj.insert(
                "reasoning".into(),
                serde_json::json!({ "effort": effort.to_string() }),
            );
        } else if settings.reasoning_effort.is_some() {
            debug!(
                model = self.model.as_str(),
                "reasoning_effort ignored for non-reasoning model"
            );
        }

        let truncation = settings
            .truncation
            .or_else(|| self.model.is_reasoning().then_some(Truncation::Auto));
        if let Some(truncation) = truncation {
            obj.insert("truncation".into(), truncation.to_string().into());
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

    /// Convert a Responses API payload into a provider response.
    fn parse_response(data: ResponsesApiResponse) -> Result<ProviderResponse, AgentError> {
        if data.status.as_deref() == Some("failed") {
            let message = data
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "response failed without an error message".into());
            return Err(AgentError::ModelBehavior(message));
        }

        let mut text = String::new();
        let mut refusal: Option<String> = None;
        for item in data.output.into_iter().filter(|o| o.r#type == "message") {
            for part in item.content.unwrap_or_default() {
                match part.r#type.as_str() {
                    "output_text" => {
                        if let Some(segment) = part.text {
                            text.push_str(&segment);
                        }
                    }
                    "refusal" => {
                        if let Some(reason) = part.refusal {
                            refusal.get_or_insert_with(String::new).push_str(&reason);
                        }
                    }
                    _ => {}
                }
            }
        }

        let finish_reason = match data.status.as_deref() {
            Some("completed") => Some(FinishReason::Stop),
            Some("incomplete") => match data.incomplete_details.and_then(|d| d.reason).as_deref() {
                Some("content_filter") => Some(FinishReason::ContentFilter),
                _ => Some(FinishReason::Length),
            },
            _ => None,
        };

        Ok(ProviderResponse {
            response_id: data.id,
            text,
            refusal,
            usage: data.usage.map(ResponsesUsage::into_usage).unwrap_or_default(),
            finish_reason,
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAiResponsesProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<ProviderResponse, AgentError> {
        validate_sampling(&self.model, &request.settings)?;
        let body = self.build_request_body(request);

        debug!(model = self.model.as_str(), "OpenAI Responses generate");

        let data: ResponsesApiResponse = self.endpoint.post_json("responses", &body).await?;
        Self::parse_response(data)
    }
}

// Responses API payload types (internal)

#[derive(Deserialize)]
struct ResponsesApiResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Vec<ResponsesOutputItem>,
    #[serde(default)]
    usage: Option<ResponsesUsage>,
    #[serde(default)]
    incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    error: Option<ResponsesError>,
}

#[derive(Deserialize)]
struct ResponsesOutputItem {
    r#type: String,
    #[serde(default)]
    content: Option<Vec<ResponsesOutputContent>>,
}

#[derive(Deserialize)]
struct ResponsesOutputContent {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct IncompleteDetails {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponsesError {
    message: String,
}

#[derive(Deserialize)]
struct ResponsesUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
    #[serde(default)]
    total_tokens: Option<u32>,
    #[serde(default)]
    input_tokens_details: Option<InputTokensDetails>,
    #[serde(default)]
    output_tokens_details: Option<OutputTokensDetails>,
}

#[derive(Deserialize)]
struct InputTokensDetails {
    #[serde(default)]
    cached_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct OutputTokensDetails {
    #[serde(default)]
    reasoning_tokens: Option<u32>,
}

impl ResponsesUsage {
    fn into_usage(self) -> Usage {
        Usage {
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
            total_tokens: self
                .total_tokens
                .unwrap_or(self.input_tokens.saturating_add(self.output_tokens)),
            cached_tokens: self.input_tokens_details.and_then(|d| d.cached_tokens),
            reasoning_tokens: self.output_tokens_details.and_then(|d| d.reasoning_tokens),
        }
    }
}
