//! Model settings and related enums.

use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Sampling and request options passed through to the model.
///
/// Every field is optional; unset fields are left out of the request so the
/// provider default applies.
///
/// ```
/// use agentrun::types::{ModelSettings, ReasoningEffort};
///
/// let settings = ModelSettings::builder()
///     .temperature(0.3)
///     .max_tokens(256)
///     .build();
/// assert_eq!(settings.temperature, Some(0.3));
/// assert_eq!(settings.reasoning_effort, None::<ReasoningEffort>);
/// ```
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct ModelSettings {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub max_tokens: Option<u32>,
    pub reasoning_effort: Option<ReasoningEffort>,
    pub truncation: Option<Truncation>,
    pub store: Option<bool>,
    pub metadata: Option<HashMap<String, String>>,
    pub user: Option<String>,
}

impl ModelSettings {
    /// Overlay `overrides` on top of `self`. Fields set in `overrides` win.
    pub fn resolve(&self, overrides: Option<&ModelSettings>) -> ModelSettings {
        let Some(o) = overrides else {
            return self.clone();
        };
        ModelSettings {
            temperature: o.temperature.or(self.temperature),
            top_p: o.top_p.or(self.top_p),
            frequency_penalty: o.frequency_penalty.or(self.frequency_penalty),
            presence_penalty: o.presence_penalty.or(self.presence_penalty),
            max_tokens: o.max_tokens.or(self.max_tokens),
            reasoning_effort: o.reasoning_effort.or(self.reasoning_effort),
            truncation: o.truncation.or(self.truncation),
            store: o.store.or(self.store),
            metadata: o.metadata.clone().or_else(|| self.metadata.clone()),
            user: o.user.clone().or_else(|| self.user.clone()),
        }
    }

    /// Whether `temperature` or `top_p` is set.
    pub fn has_sampling_params(&self) -> bool {
        self.temperature.is_some() || self.top_p.is_some()
    }
}

/// Reasoning effort level for reasoning models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    Low,
    Medium,
    High,
}

/// Responses API truncation strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Truncation {
    Auto,
    Disabled,
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}
