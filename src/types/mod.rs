//! Core types for agentrun.

pub mod message;
pub mod settings;
pub mod usage;

pub use message::*;
pub use settings::*;
pub use usage::*;
