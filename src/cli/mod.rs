//! Command-line arguments for the `hello_world` binary.

use clap::Parser;

use crate::models::OpenAiApi;
use crate::runner::RunConfig;

pub const DEFAULT_AGENT_NAME: &str = "Assistant";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant";
pub const DEFAULT_PROMPT: &str = "Write a haiku about the OpenAI agents SDK.";

/// Run one prompt through an agent and print the final output.
///
/// With no arguments this runs the `Assistant` agent on the haiku prompt.
#[derive(Parser, Debug)]
#[command(name = "hello_world", version, about = "Run one prompt through an agent")]
pub struct Cli {
    /// Agent name
    #[arg(long, default_value = DEFAULT_AGENT_NAME)]
    pub name: String,

    /// Agent instructions
    #[arg(long, default_value = DEFAULT_INSTRUCTIONS)]
    pub instructions: String,

    /// Prompt to run
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Model id (defaults to OPENAI_DEFAULT_MODEL, then gpt-4.1)
    #[arg(short, long)]
    pub model: Option<String>,

    /// API surface: responses or chat_completions
    #[arg(long)]
    pub api: Option<OpenAiApi>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Per-run overrides implied by the flags.
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new();
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(api) = self.api {
            config = config.with_api(api);
        }
        config
    }
}
