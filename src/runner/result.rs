//! Run results.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::types::{FinishReason, ModelMessage, Usage};

/// Bookkeeping for one model call made during a run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelResponse {
    /// Provider-assigned response id, when the API returns one.
    pub response_id: Option<String>,
    pub model: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// The outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub run_id: Uuid,
    /// The prompt the run was started with.
    pub input: String,
    /// Final textual output. Never empty.
    pub final_output: String,
    /// Messages produced during the run, in order.
    pub new_items: Vec<ModelMessage>,
    pub raw_responses: Vec<ModelResponse>,
    /// Usage summed over `raw_responses`.
    pub usage: Usage,
    /// Name of the agent that produced `final_output`.
    pub last_agent: String,
}

impl RunResult {
    pub fn final_output(&self) -> &str {
        &self.final_output
    }

    /// The original input followed by everything the run produced, ready to
    /// seed a follow-up run.
    pub fn to_input_list(&self) -> Vec<ModelMessage> {
        let mut items = Vec::with_capacity(self.new_items.len() + 1);
        items.push(ModelMessage::user(self.input.clone()));
        items.extend(self.new_items.iter().cloned());
        items
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.final_output)
    }
}
