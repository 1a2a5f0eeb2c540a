//! OpenAI model definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Model used when neither the run, the agent, nor the environment names one.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// OpenAI models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString)]
pub enum OpenAiModel {
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
    #[strum(serialize = "gpt-4.1")]
    Gpt41,
    #[strum(serialize = "gpt-4.1-mini")]
    Gpt41Mini,
    #[strum(serialize = "gpt-4.1-nano")]
    Gpt41Nano,
    #[strum(serialize = "o1")]
    O1,
    #[strum(serialize = "o3")]
    O3,
    #[strum(serialize = "o3-mini")]
    O3Mini,
    #[strum(serialize = "o4-mini")]
    O4Mini,
    #[strum(serialize = "gpt-5")]
    Gpt5,
    #[strum(serialize = "gpt-5-mini")]
    Gpt5Mini,
    #[strum(serialize = "gpt-5-nano")]
    Gpt5Nano,
    /// Any model id not listed above, passed through verbatim.
    #[strum(default)]
    Custom(String),
}

impl OpenAiModel {
    /// Parse a model id. Unknown ids become [`OpenAiModel::Custom`].
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or_else(|_| Self::Custom(id.to_string()))
    }

    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::O1 => "o1",
            Self::O3 => "o3",
            Self::O3Mini => "o3-mini",
            Self::O4Mini => "o4-mini",
            Self::Gpt5 => "gpt-5",
            Self::Gpt5Mini => "gpt-5-mini",
            Self::Gpt5Nano => "gpt-5-nano",
            Self::Custom(s) => s,
        }
    }

    /// Whether this is an o-series reasoning model.
    pub fn is_reasoning(&self) -> bool {
        match self {
            Self::O1 | Self::O3 | Self::O3Mini | Self::O4Mini => true,
            Self::Custom(id) => ["o1", "o3", "o4"].iter().any(|p| id.starts_with(p)),
            _ => false,
        }
    }

    pub fn is_gpt5_family(&self) -> bool {
        match self {
            Self::Gpt5 | Self::Gpt5Mini | Self::Gpt5Nano => true,
            Self::Custom(id) => id.starts_with("gpt-5"),
            _ => false,
        }
    }

    /// Whether the model accepts `temperature` / `top_p`.
    pub fn supports_sampling_params(&self) -> bool {
        !(self.is_reasoning() || self.is_gpt5_family())
    }

    /// Whether requests should carry a `reasoning` block.
    pub fn needs_reasoning(&self) -> bool {
        self.is_reasoning() || self.is_gpt5_family()
    }
}

impl Default for OpenAiModel {
    fn default() -> Self {
        Self::from_id(DEFAULT_MODEL)
    }
}

impl fmt::Display for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
