//! Model provider trait and the OpenAI implementations.

pub mod http;
pub mod openai;
pub mod openai_responses;

use async_trait::async_trait;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::models::{OpenAiApi, OpenAiModel};
use crate::types::{FinishReason, ModelMessage, ModelSettings, Usage};

pub use http::Endpoint;
pub use openai::OpenAiChatProvider;
pub use openai_responses::OpenAiResponsesProvider;

/// A request sent to a model provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderRequest {
    /// System-level instructions (the agent's instructions).
    pub instructions: Option<String>,
    pub input: Vec<ModelMessage>,
    pub settings: ModelSettings,
}

/// Response from a provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResponse {
    /// Provider-assigned id (`resp_...` / `chatcmpl-...`).
    pub response_id: Option<String>,
    pub text: String,
    pub refusal: Option<String>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by all model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g. "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Issue one non-streaming generation request.
    async fn generate(&self, request: &ProviderRequest) -> Result<ProviderResponse, AgentError>;
}

/// Create a provider for `model` on the chosen API surface.
pub fn create_provider(
    model: &OpenAiModel,
    api: OpenAiApi,
    config: &AgentConfig,
) -> Result<Box<dyn ModelProvider>, AgentError> {
    let endpoint = Endpoint::from_config(config)?;
    match api {
        OpenAiApi::Responses => Ok(Box::new(OpenAiResponsesProvider::new(
            model.clone(),
            endpoint,
        ))),
        OpenAiApi::ChatCompletions => {
            Ok(Box::new(OpenAiChatProvider::new(model.clone(), endpoint)))
        }
    }
}

/// Reject sampling parameters the model would refuse server-side.
pub(crate) fn validate_sampling(
    model: &OpenAiModel,
    settings: &ModelSettings,
) -> Result<(), AgentError> {
    if model.supports_sampling_params() {
        return Ok(());
    }
    if settings.has_sampling_params() {
        return Err(AgentError::InvalidArgument(format!(
            "temperature/top_p not supported for model {}",
            model.as_str()
        )));
    }
    if settings.frequency_penalty.is_some() || settings.presence_penalty.is_some() {
        return Err(AgentError::InvalidArgument(format!(
            "frequency_penalty/presence_penalty not supported for model {}",
            model.as_str()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_provider_requires_api_key() {
        let err = create_provider(&OpenAiModel::Gpt41, OpenAiApi::Responses, &AgentConfig::new())
            .err()
            .unwrap();
        assert!(matches!(err, AgentError::Authentication(_)));
    }

    #[test]
    fn create_provider_selects_backend() {
        let config = AgentConfig::new().with_api_key("test-key");
        let responses =
            create_provider(&OpenAiModel::Gpt41, OpenAiApi::Responses, &config).unwrap();
        let chat =
            create_provider(&OpenAiModel::Gpt41, OpenAiApi::ChatCompletions, &config).unwrap();
        assert_eq!(responses.model_id(), "gpt-4.1");
        assert_eq!(chat.model_id(), "gpt-4.1");
        assert_eq!(responses.provider_name(), "openai");
        assert_eq!(chat.provider_name(), "openai-chat");
    }

    #[test]
    fn sampling_rejected_for_reasoning_models() {
        let settings = ModelSettings::builder().temperature(0.7).build();
        let err = validate_sampling(&OpenAiModel::O3, &settings).unwrap_err();
        assert!(matches!(err, AgentError::InvalidArgument(_)));
        assert!(validate_sampling(&OpenAiModel::Gpt41, &settings).is_ok());
    }

    #[test]
    fn penalties_rejected_for_reasoning_models() {
        let settings = ModelSettings::builder().presence_penalty(0.3).build();
        let err = validate_sampling(&OpenAiModel::O3, &settings).unwrap_err();
        assert!(
            matches!(err, AgentError::InvalidArgument(ref m) if m.contains("presence_penalty"))
        );

        let settings = ModelSettings::builder().frequency_penalty(0.5).build();
        assert!(validate_sampling(&OpenAiModel::Gpt5Mini, &settings).is_err());
        assert!(validate_sampling(&OpenAiModel::Gpt4o, &settings).is_ok());
        assert!(validate_sampling(&OpenAiModel::O3, &ModelSettings::default()).is_ok());
    }
}
