//! Configuration management for the tripmate CLI.
//!
//! Settings are layered: built-in defaults, then `~/.tripmate/config` (JSON),
//! then environment variables (including a `.env` file loaded at startup), then
//! command-line overrides. [`Config::validate`] is run before any LLM call.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
pub use constants::MAX_RETRIES_LIMIT;
pub use types::{AgentSettings, Config, LlmProvider, LlmSettings, ModelSettings, ServiceSettings};
