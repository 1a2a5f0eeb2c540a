//! Runs an agent against one prompt and collects the final output.

mod config;
mod result;

pub use config::{RunConfig, DEFAULT_WORKFLOW_NAME};
pub use result::{ModelResponse, RunResult};

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::models::OpenAiModel;
use crate::provider::{self, ModelProvider, ProviderRequest};
use crate::types::{FinishReason, ModelMessage};
use crate::util::retry::RetryPolicy;

/// Executes runs. Holds no per-run state, so one runner can be shared.
#[derive(Debug, Clone)]
pub struct Runner {
    config: AgentConfig,
    retry_policy: RetryPolicy,
}

impl Runner {
    pub fn new(config: AgentConfig) -> Self {
        let retry_policy = RetryPolicy::with_retries(config.max_retries());
        Self {
            config,
            retry_policy,
        }
    }

    /// Runner configured from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AgentConfig::from_env()?))
    }

    /// Replace the backoff policy derived from the config.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run `agent` on `input` with default run settings.
    pub async fn run(&self, agent: &Agent, input: impl Into<String>) -> Result<RunResult> {
        self.run_with_config(agent, input, &RunConfig::default()).await
    }

    /// Run `agent` on `input`.
    ///
    /// The model is taken from `run_config`, then the agent, then the
    /// configured default.
    pub async fn run_with_config(
        &self,
        agent: &Agent,
        input: impl Into<String>,
        run_config: &RunConfig,
    ) -> Result<RunResult> {
        agent.validate()?;
        let model_id = run_config
            .model
            .as_deref()
            .or(agent.model())
            .unwrap_or(self.config.default_model());
        let model = OpenAiModel::from_id(model_id);
        let api = run_config.api.unwrap_or(self.config.api());
        let provider = provider::create_provider(&model, api, &self.config)?;
        self.execute(agent, input.into(), run_config, provider.as_ref()).await
    }

    /// Run against an explicit provider instead of the configured OpenAI one.
    pub async fn run_with_provider(
        &self,
        agent: &Agent,
        input: impl Into<String>,
        run_config: &RunConfig,
        provider: &dyn ModelProvider,
    ) -> Result<RunResult> {
        agent.validate()?;
        self.execute(agent, input.into(), run_config, provider).await
    }

    /// Blocking form of [`Runner::run`].
    ///
    /// Fails with [`AgentError::InvalidState`] when called from inside an
    /// async runtime; use `run` there.
    pub fn run_sync(&self, agent: &Agent, input: impl Into<String>) -> Result<RunResult> {
        self.run_sync_with_config(agent, input, &RunConfig::default())
    }

    /// Blocking form of [`Runner::run_with_config`].
    pub fn run_sync_with_config(
        &self,
        agent: &Agent,
        input: impl Into<String>,
        run_config: &RunConfig,
    ) -> Result<RunResult> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(AgentError::InvalidState(
                "run_sync cannot be called from within an async runtime; use Runner::run".into(),
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AgentError::InvalidState(format!("failed to start runtime: {e}")))?;
        runtime.block_on(self.run_with_config(agent, input, run_config))
    }

    async fn execute(
        &self,
        agent: &Agent,
        input: String,
        run_config: &RunConfig,
        provider: &dyn ModelProvider,
    ) -> Result<RunResult> {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "agent_run",
            workflow = %run_config.workflow_name,
            agent = agent.name(),
            model = provider.model_id(),
            %run_id
        );

        async move {
            let request = ProviderRequest {
                instructions: Some(agent.instructions().to_string()),
                input: vec![ModelMessage::user(input.clone())],
                settings: agent
                    .model_settings()
                    .resolve(run_config.model_settings.as_ref()),
            };

            let mut policy = self.retry_policy.clone();
            if let Some(retries) = run_config.max_retries {
                policy.max_attempts = retries.saturating_add(1);
            }

            let response = policy.execute(|| provider.generate(&request)).await?;

            if response.text.trim().is_empty() {
                if let Some(refusal) = response.refusal {
                    return Err(AgentError::Refusal(refusal));
                }
                return Err(AgentError::ModelBehavior(format!(
                    "model {} returned no text output",
                    provider.model_id()
                )));
            }
            if response.finish_reason == Some(FinishReason::Length) {
                warn!("model output was truncated by the token limit");
            }

            info!(
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "run completed"
            );

            let raw = ModelResponse {
                response_id: response.response_id,
                model: provider.model_id().to_string(),
                usage: response.usage.clone(),
                finish_reason: response.finish_reason,
            };
            Ok::<_, AgentError>(RunResult {
                run_id,
                input,
                final_output: response.text.clone(),
                new_items: vec![ModelMessage::assistant(response.text)],
                raw_responses: vec![raw],
                usage: response.usage,
                last_agent: agent.name().to_string(),
            })
        }
        .instrument(span)
        .await
    }
}
