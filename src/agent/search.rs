use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const NO_RESULT: &str = "No good DuckDuckGo Search Result was found";

const MAX_RELATED_TOPICS: usize = 5;

#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn search(&self, query: &str) -> Result<String>;
}

/// DuckDuckGo Instant Answer API. Keyless, so it works with any provider.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    http: Client,
    url: String,
}

impl DuckDuckGoSearch {
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .context("Failed to build search HTTP client")?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl SearchTool for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<String> {
        debug!(query, "web search");
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .context("Search request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Search service returned status {status}");
        }

        // The API answers with `application/x-javascript`, so decode the text ourselves.
        let body = response.text().await.context("Failed to read search response")?;
        let answer: InstantAnswer =
            serde_json::from_str(&body).context("Failed to parse search response JSON")?;

        Ok(answer.summary())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    answer: serde_json::Value,
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// Either a single topic (`Text`, `FirstURL`) or a named group of `Topics`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelatedTopic {
    #[serde(default)]
    text: String,
    #[serde(default, rename = "FirstURL")]
    first_url: String,
    #[serde(default)]
    topics: Vec<RelatedTopic>,
}

impl RelatedTopic {
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a RelatedTopic>) {
        if !self.text.trim().is_empty() {
            out.push(self);
        }
        for topic in &self.topics {
            topic.collect_into(out);
        }
    }
}

impl InstantAnswer {
    fn summary(&self) -> String {
        let mut parts = Vec::new();

        match &self.answer {
            serde_json::Value::String(text) if !text.trim().is_empty() => {
                parts.push(format!("Answer: {}", text.trim()));
            }
            serde_json::Value::Number(number) => parts.push(format!("Answer: {number}")),
            _ => {}
        }

        if !self.abstract_text.trim().is_empty() {
            if self.abstract_url.is_empty() {
                parts.push(self.abstract_text.trim().to_string());
            } else {
                parts.push(format!(
                    "{} (source: {})",
                    self.abstract_text.trim(),
                    self.abstract_url
                ));
            }
        }

        let mut topics = Vec::new();
        for topic in &self.related_topics {
            topic.collect_into(&mut topics);
        }
        for topic in topics.into_iter().take(MAX_RELATED_TOPICS) {
            if topic.first_url.is_empty() {
                parts.push(format!("- {}", topic.text.trim()));
            } else {
                parts.push(format!("- {} ({})", topic.text.trim(), topic.first_url));
            }
        }

        if parts.is_empty() {
            NO_RESULT.to_string()
        } else {
            parts.join("\n")
        }
    }
}
