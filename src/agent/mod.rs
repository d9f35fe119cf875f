//! Reasoning backend for every category except `weather`.
//!
//! An [`AgentInvoker`] takes one instantiated template and returns the raw
//! model output. [`ReactAgent`] is the production implementation, a
//! structured-chat loop over an [`LlmClient`](crate::client::LlmClient) with a
//! single `web_search` tool.

mod parsing;
mod prompt;
mod react;
mod search;

use async_trait::async_trait;

use crate::error::PlanError;

pub use react::ReactAgent;
pub use search::{DuckDuckGoSearch, SearchTool};

#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, PlanError>;
}

#[cfg(test)]
mod tests;
