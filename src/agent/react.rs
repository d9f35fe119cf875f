use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::AgentInvoker;
use super::parsing::{AgentStep, parse_step};
use super::prompt::{
    AGENT_SYSTEM_PROMPT, format_error_observation, invalid_tool_observation, search_observation,
};
use super::search::SearchTool;
use crate::client::{ChatCompletionRequest, ChatMessage, DynLlmClient};
use crate::config::{AgentSettings, MAX_RETRIES_LIMIT, ModelSettings};
use crate::error::PlanError;

/// Returned when the model never produces a final answer within the step budget.
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Structured-chat agent: the model answers with JSON actions, either a
/// `web_search` or the `Final Answer`, until it finishes or runs out of steps.
pub struct ReactAgent {
    llm: Arc<DynLlmClient>,
    search: Arc<dyn SearchTool>,
    model: ModelSettings,
    max_steps: u32,
    max_retries: u32,
    timeout: Duration,
    retry_delay: Duration,
}

impl ReactAgent {
    pub fn new(
        llm: Arc<DynLlmClient>,
        search: Arc<dyn SearchTool>,
        model: ModelSettings,
        limits: &AgentSettings,
    ) -> Self {
        Self {
            llm,
            search,
            model,
            max_steps: limits.max_steps.max(1),
            max_retries: limits.max_retries.min(MAX_RETRIES_LIMIT),
            timeout: Duration::from_secs(limits.timeout_secs),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Base delay between retries; the n-th retry waits `n * delay`.
    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, prompt: &str) -> Result<String, PlanError> {
        let mut messages = vec![
            ChatMessage::system(AGENT_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        for step in 1..=self.max_steps {
            let reply = self.complete(&messages).await?;

            let observation = match parse_step(&reply) {
                AgentStep::Final(answer) => {
                    debug!(step, chars = answer.len(), "agent produced final answer");
                    return Ok(answer);
                }
                AgentStep::Search(query) => {
                    debug!(step, %query, "agent requested web search");
                    match self.search.search(&query).await {
                        Ok(result) => search_observation(&result),
                        Err(err) => {
                            warn!(error = %err, "web search failed");
                            search_observation(&format!("Search failed: {err:#}"))
                        }
                    }
                }
                AgentStep::UnknownTool(action) => {
                    debug!(step, %action, "agent requested unknown tool");
                    invalid_tool_observation(&action)
                }
                AgentStep::Unparseable(reason) => {
                    debug!(step, %reason, "agent reply could not be parsed");
                    format_error_observation(&reason)
                }
            };

            if !reply.is_empty() {
                messages.push(ChatMessage::assistant(reply));
            }
            messages.push(ChatMessage::user(observation));
        }

        warn!(max_steps = self.max_steps, "agent hit iteration limit");
        Ok(ITERATION_LIMIT_MESSAGE.to_string())
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, PlanError> {
        let mut attempt = 0;
        loop {
            let request = ChatCompletionRequest {
                model: self.model.model.clone(),
                messages: messages.to_vec(),
                max_tokens: Some(self.model.max_tokens),
                temperature: Some(self.model.temperature),
            };

            match self.llm.chat_completion(request).await {
                Ok(response) if response.choices.is_empty() => {
                    return Err(PlanError::BackendUnavailable(
                        "model returned no choices".into(),
                    ));
                }
                Ok(response) => {
                    let finish_reason = response.choices[0].finish_reason.as_deref().unwrap_or("none");
                    debug!(finish_reason, attempt, "LLM reply received");
                    return Ok(response.first_text().unwrap_or_default().to_string());
                }
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.retry_delay * attempt;
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying LLM call");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(PlanError::BackendUnavailable(err.to_string())),
            }
        }
    }
}

#[async_trait]
impl AgentInvoker for ReactAgent {
    async fn invoke(&self, prompt: &str) -> Result<String, PlanError> {
        match tokio::time::timeout(self.timeout, self.run(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(PlanError::BackendUnavailable(format!(
                "agent timed out after {:.1}s",
                self.timeout.as_secs_f64()
            ))),
        }
    }
}
