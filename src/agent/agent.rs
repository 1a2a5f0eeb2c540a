//! Agent descriptor: a name, instructions, and optional model choice.

use crate::error::AgentError;
use crate::types::ModelSettings;

/// A named, instruction-following agent.
///
/// Agents are plain values. A run borrows the agent and never mutates it, so
/// one descriptor can serve any number of runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    name: String,
    instructions: String,
    model: Option<String>,
    model_settings: ModelSettings,
}

impl Agent {
    /// Create a new agent.
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: None,
            model_settings: ModelSettings::default(),
        }
    }

    /// Pin the agent to a model id (e.g. `gpt-4o-mini`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set model settings.
    pub fn with_model_settings(mut self, settings: ModelSettings) -> Self {
        self.model_settings = settings;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn model_settings(&self) -> &ModelSettings {
        &self.model_settings
    }

    /// Check the descriptor before it is used for a run.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.name.trim().is_empty() {
            return Err(AgentError::InvalidArgument(
                "agent name must not be empty".into(),
            ));
        }
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(AgentError::InvalidArgument(format!(
                    "agent '{}' has an empty model id",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
