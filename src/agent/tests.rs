use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::StatusCode;

use super::react::ITERATION_LIMIT_MESSAGE;
use super::{AgentInvoker, ReactAgent, SearchTool};
use crate::client::{
    ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatMessageRole,
    ClientError, LlmClient,
};
use crate::config::{AgentSettings, ModelSettings};
use crate::error::PlanError;

type Scripted = Result<ChatCompletionResponse, ClientError>;

struct ScriptedLlm {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedLlm {
    fn new(replies: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, idx: usize) -> ChatCompletionRequest {
        self.requests.lock().unwrap()[idx].clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Decode("no more scripted replies".into())))
    }
}

struct SlowLlm;

#[async_trait]
impl LlmClient for SlowLlm {
    async fn chat_completion(
        &self,
        _request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ClientError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(reply("{\"action\": \"Final Answer\", \"action_input\": \"late\"}"))
    }
}

#[derive(Default)]
struct FakeSearch {
    queries: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl SearchTool for FakeSearch {
    async fn search(&self, query: &str) -> Result<String> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            Err(anyhow!("connection reset"))
        } else {
            Ok(format!("3 trains daily for '{query}'"))
        }
    }
}

fn reply(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![ChatChoice {
            message: ChatChoiceMessage {
                content: Some(content.to_string()),
            },
            finish_reason: Some("stop".to_string()),
        }],
    }
}

fn final_answer(text: &str) -> Scripted {
    Ok(reply(&format!(
        "{{\"action\": \"Final Answer\", \"action_input\": \"{text}\"}}"
    )))
}

fn web_search(query: &str) -> Scripted {
    Ok(reply(&format!(
        "{{\"action\": \"web_search\", \"action_input\": \"{query}\"}}"
    )))
}

fn limits(max_steps: u32, max_retries: u32) -> AgentSettings {
    AgentSettings {
        max_steps,
        max_retries,
        timeout_secs: 30,
    }
}

fn agent(llm: Arc<dyn LlmClient>, search: Arc<FakeSearch>, limits: AgentSettings) -> ReactAgent {
    let model = ModelSettings {
        model: "test-model".to_string(),
        temperature: 0.2,
        max_tokens: 256,
    };
    ReactAgent::new(llm, search, model, &limits).with_retry_delay(Duration::ZERO)
}

#[tokio::test]
async fn returns_final_answer_from_first_reply() {
    let llm = ScriptedLlm::new(vec![final_answer("Take the Shatabdi Express.")]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 2));

    let output = agent.invoke("Distance from Delhi to Jaipur?").await.unwrap();

    assert_eq!(output, "Take the Shatabdi Express.");
    assert_eq!(llm.call_count(), 1);

    let request = llm.request(0);
    assert_eq!(request.model, "test-model");
    assert_eq!(request.max_tokens, Some(256));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, ChatMessageRole::System);
    assert!(request.messages[0].content.contains("web_search"));
    assert_eq!(request.messages[1].role, ChatMessageRole::User);
    assert_eq!(request.messages[1].content, "Distance from Delhi to Jaipur?");
}

#[tokio::test]
async fn search_result_is_fed_back_as_observation() {
    let llm = ScriptedLlm::new(vec![
        web_search("Delhi to Jaipur trains"),
        final_answer("| Train | Duration |"),
    ]);
    let search = Arc::new(FakeSearch::default());
    let agent = agent(llm.clone(), search.clone(), limits(6, 2));

    let output = agent.invoke("trains?").await.unwrap();

    assert_eq!(output, "| Train | Duration |");
    assert_eq!(
        *search.queries.lock().unwrap(),
        vec!["Delhi to Jaipur trains".to_string()]
    );

    let second = llm.request(1);
    assert_eq!(second.messages.len(), 4);
    assert_eq!(second.messages[2].role, ChatMessageRole::Assistant);
    assert_eq!(
        second.messages[3].content,
        "Observation: 3 trains daily for 'Delhi to Jaipur trains'"
    );
}

#[tokio::test]
async fn search_failure_becomes_observation() {
    let llm = ScriptedLlm::new(vec![web_search("Goa shacks"), final_answer("Try Baga beach.")]);
    let search = Arc::new(FakeSearch {
        fail: true,
        ..FakeSearch::default()
    });
    let agent = agent(llm.clone(), search, limits(6, 2));

    let output = agent.invoke("food?").await.unwrap();

    assert_eq!(output, "Try Baga beach.");
    let observation = &llm.request(1).messages[3].content;
    assert!(observation.starts_with("Observation: Search failed: connection reset"));
}

#[tokio::test]
async fn unparseable_reply_asks_for_valid_action() {
    let llm = ScriptedLlm::new(vec![
        Ok(reply("Let me think about Jaipur for a moment.")),
        final_answer("Visit Amber Fort."),
    ]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 2));

    let output = agent.invoke("places?").await.unwrap();

    assert_eq!(output, "Visit Amber Fort.");
    let observation = &llm.request(1).messages[3].content;
    assert!(observation.starts_with("Observation: Invalid or incomplete response"));
    assert!(observation.contains("\"action\""));
}

#[tokio::test]
async fn unknown_tool_is_reported_to_model() {
    let llm = ScriptedLlm::new(vec![
        Ok(reply("{\"action\": \"booking_api\", \"action_input\": \"hotel\"}")),
        final_answer("Book directly."),
    ]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 2));

    agent.invoke("hotels?").await.unwrap();

    assert_eq!(
        llm.request(1).messages[3].content,
        "Observation: booking_api is not a valid tool, try one of [web_search]."
    );
}

#[tokio::test]
async fn plain_final_answer_marker_is_accepted() {
    let llm = ScriptedLlm::new(vec![Ok(reply(
        "Thought: I have it.\nFinal Answer: Carry an umbrella.",
    ))]);
    let agent = agent(llm, Arc::new(FakeSearch::default()), limits(6, 2));

    assert_eq!(agent.invoke("tips?").await.unwrap(), "Carry an umbrella.");
}

#[tokio::test]
async fn iteration_limit_returns_literal_message() {
    let llm = ScriptedLlm::new(vec![web_search("a"), web_search("b"), final_answer("never")]);
    let search = Arc::new(FakeSearch::default());
    let agent = agent(llm.clone(), search.clone(), limits(2, 2));

    let output = agent.invoke("loop").await.unwrap();

    assert_eq!(output, ITERATION_LIMIT_MESSAGE);
    assert_eq!(llm.call_count(), 2);
    assert_eq!(search.queries.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn transient_errors_are_retried() {
    let llm = ScriptedLlm::new(vec![
        Err(ClientError::RateLimited("slow down".into())),
        Err(ClientError::Unavailable(StatusCode::BAD_GATEWAY)),
        final_answer("Recovered."),
    ]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 2));

    assert_eq!(agent.invoke("retry").await.unwrap(), "Recovered.");
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn exhausted_retries_are_backend_unavailable() {
    let llm = ScriptedLlm::new(vec![
        Err(ClientError::Unavailable(StatusCode::SERVICE_UNAVAILABLE)),
        Err(ClientError::Unavailable(StatusCode::SERVICE_UNAVAILABLE)),
        Err(ClientError::Unavailable(StatusCode::SERVICE_UNAVAILABLE)),
        final_answer("too late"),
    ]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 2));

    let err = agent.invoke("retry").await.unwrap_err();

    assert!(matches!(err, PlanError::BackendUnavailable(_)));
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn configured_retries_are_clamped_to_two() {
    let llm = ScriptedLlm::new(vec![
        Err(ClientError::RateLimited("1".into())),
        Err(ClientError::RateLimited("2".into())),
        Err(ClientError::RateLimited("3".into())),
        Err(ClientError::RateLimited("4".into())),
        final_answer("unreachable"),
    ]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 10));

    assert!(agent.invoke("retry").await.is_err());
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn permanent_error_is_not_retried() {
    let llm = ScriptedLlm::new(vec![Err(ClientError::Unauthorized), final_answer("no")]);
    let agent = agent(llm.clone(), Arc::new(FakeSearch::default()), limits(6, 2));

    let err = agent.invoke("auth").await.unwrap_err();

    assert_eq!(
        err,
        PlanError::BackendUnavailable(
            "Invalid API key. Please check your API key configuration.".into()
        )
    );
    assert_eq!(err.user_message(), "Error: No output received.");
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn response_without_choices_is_backend_unavailable() {
    let llm = ScriptedLlm::new(vec![Ok(ChatCompletionResponse { choices: vec![] })]);
    let agent = agent(llm, Arc::new(FakeSearch::default()), limits(6, 2));

    let err = agent.invoke("empty").await.unwrap_err();
    assert!(matches!(err, PlanError::BackendUnavailable(msg) if msg.contains("no choices")));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let agent = agent(Arc::new(SlowLlm), Arc::new(FakeSearch::default()), limits(6, 2))
        .with_timeout(Duration::from_millis(50));

    let err = agent.invoke("slow").await.unwrap_err();
    assert!(matches!(err, PlanError::BackendUnavailable(msg) if msg.contains("timed out")));
}
