//! Per-run overrides.

use crate::models::OpenAiApi;
use crate::types::ModelSettings;

pub const DEFAULT_WORKFLOW_NAME: &str = "Agent workflow";

/// Settings that apply to a single run and take precedence over the agent
/// and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Model id used instead of the agent's / the configured default.
    pub model: Option<String>,
    /// API surface used instead of the configured default.
    pub api: Option<OpenAiApi>,
    /// Merged over the agent's settings; set fields win.
    pub model_settings: Option<ModelSettings>,
    /// Name recorded on the run's tracing span.
    pub workflow_name: String,
    /// Retries after the first attempt.
    pub max_retries: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: None,
            api: None,
            model_settings: None,
            workflow_name: DEFAULT_WORKFLOW_NAME.to_string(),
            max_retries: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api(mut self, api: OpenAiApi) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_model_settings(mut self, settings: ModelSettings) -> Self {
        self.model_settings = Some(settings);
        self
    }

    pub fn with_workflow_name(mut self, name: impl Into<String>) -> Self {
        self.workflow_name = name.into();
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}
