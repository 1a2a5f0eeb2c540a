//! agentrun: run a named, instruction-following agent against an OpenAI
//! model and get its final text back.
//!
//! Configuration comes from the environment (a `.env` file is loaded when
//! present); see [`config::AgentConfig`] for the variables read.
//!
//! # Quick Start
//!
//! ```no_run
//! use agentrun::prelude::*;
//!
//! # fn example() -> agentrun::error::Result<()> {
//! let agent = Agent::new("Assistant", "You are a helpful assistant");
//! let result = Runner::from_env()?.run_sync(&agent, "Write a haiku about Rust.")?;
//! println!("{}", result.final_output);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod runner;
pub mod telemetry;
pub mod types;
pub mod util;
