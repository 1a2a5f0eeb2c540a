//! Model identifiers and API selection.

pub mod openai;

pub use openai::{OpenAiModel, DEFAULT_MODEL};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which OpenAI HTTP surface a run talks to.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OpenAiApi {
    /// `POST /responses`
    #[default]
    Responses,
    /// `POST /chat/completions`
    ChatCompletions,
}
