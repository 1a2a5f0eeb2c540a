//! Configuration resolved from the process environment (and `.env`).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::AgentError;
use crate::models::{OpenAiApi, DEFAULT_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_RETRIES: u32 = 2;

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
const ENV_ORG_ID: &str = "OPENAI_ORG_ID";
const ENV_PROJECT_ID: &str = "OPENAI_PROJECT_ID";
const ENV_DEFAULT_MODEL: &str = "OPENAI_DEFAULT_MODEL";
const ENV_DEFAULT_API: &str = "OPENAI_DEFAULT_API";

/// Every variable `from_env` reads.
pub const ENV_VARS: [&str; 6] = [
    ENV_API_KEY,
    ENV_BASE_URL,
    ENV_ORG_ID,
    ENV_PROJECT_ID,
    ENV_DEFAULT_MODEL,
    ENV_DEFAULT_API,
];

/// Credentials and endpoint settings for talking to OpenAI.
///
/// A missing API key is not an error here; it surfaces as
/// [`AgentError::Authentication`] when a run asks for it.
#[derive(Clone)]
pub struct AgentConfig {
    api_key: Option<String>,
    base_url: String,
    organization: Option<String>,
    project: Option<String>,
    default_model: String,
    api: OpenAiApi,
    timeout: Duration,
    max_retries: u32,
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("default_model", &self.default_model)
            .field("api", &self.api)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            project: None,
            default_model: DEFAULT_MODEL.to_string(),
            api: OpenAiApi::default(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `.env` (if present) and resolve settings from the environment.
    pub fn from_env() -> Result<Self, AgentError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }

        let vars = ENV_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)));
        Self::from_vars(vars)
    }

    /// Resolve settings from an explicit set of variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AgentError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let mut config = Self::new();
        config.api_key = vars.get(ENV_API_KEY).cloned();
        if let Some(url) = vars.get(ENV_BASE_URL) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config.organization = vars.get(ENV_ORG_ID).cloned();
        config.project = vars.get(ENV_PROJECT_ID).cloned();
        if let Some(model) = vars.get(ENV_DEFAULT_MODEL) {
            config.default_model = model.trim().to_string();
        }
        if let Some(api) = vars.get(ENV_DEFAULT_API) {
            config.api = api.trim().parse().map_err(|_| {
                AgentError::Configuration(format!(
                    "{ENV_DEFAULT_API} must be 'responses' or 'chat_completions', got '{api}'"
                ))
            })?;
        }
        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_api(mut self, api: OpenAiApi) -> Self {
        self.api = api;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries after the first attempt; `0` disables retrying.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// The API key, or an authentication error naming the missing variable.
    pub fn api_key(&self) -> Result<&str, AgentError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AgentError::Authentication(format!("Missing {ENV_API_KEY}")))
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn api(&self) -> OpenAiApi {
        self.api
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
