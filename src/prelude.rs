//! Convenience re-exports for common use.

pub use crate::agent::Agent;
pub use crate::config::AgentConfig;
pub use crate::error::{AgentError, Result};
pub use crate::models::{OpenAiApi, OpenAiModel};
pub use crate::provider::ModelProvider;
pub use crate::runner::{RunConfig, RunResult, Runner};
pub use crate::types::{FinishReason, ModelMessage, ModelSettings, ReasoningEffort, Role, Usage};
