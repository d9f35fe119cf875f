use anyhow::anyhow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL,
    DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub llm: LlmSettings,
    pub models: ModelSettings,
    pub agent: AgentSettings,
    pub services: ServiceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Groq,
    Gemini,
    OpenRouter,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Groq => write!(f, "groq"),
            LlmProvider::Gemini => write!(f, "gemini"),
            LlmProvider::OpenRouter => write!(f, "openrouter"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openrouter" => Ok(LlmProvider::OpenRouter),
            other => Err(anyhow!(
                "Unknown LLM provider '{other}'. Supported: groq, gemini, openrouter"
            )),
        }
    }
}

impl LlmProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Groq => DEFAULT_GROQ_BASE_URL,
            LlmProvider::Gemini => DEFAULT_GEMINI_BASE_URL,
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_BASE_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Groq => DEFAULT_GROQ_MODEL,
            LlmProvider::Gemini => DEFAULT_GEMINI_MODEL,
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_MODEL,
        }
    }

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::Groq => "Groq",
            LlmProvider::Gemini => "Google Gemini",
            LlmProvider::OpenRouter => "OpenRouter",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Limits for one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub max_steps: u32,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

/// Endpoints of the non-LLM services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub search_url: String,
    pub geocoding_url: String,
    pub forecast_url: String,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub llm: Option<FileLlmSettings>,
    #[serde(default)]
    pub models: Option<FileModelSettings>,
    #[serde(default)]
    pub agent: Option<FileAgentSettings>,
    #[serde(default)]
    pub services: Option<FileServiceSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileLlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileModelSettings {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileAgentSettings {
    pub max_steps: Option<u32>,
    pub max_retries: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileServiceSettings {
    pub search_url: Option<String>,
    pub geocoding_url: Option<String>,
    pub forecast_url: Option<String>,
}

// Serialization helpers
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub llm: PersistedLlm<'a>,
    pub models: PersistedModels<'a>,
    pub agent: PersistedAgent,
    pub services: PersistedServices<'a>,
}

#[derive(Serialize)]
pub(super) struct PersistedLlm<'a> {
    pub provider: LlmProvider,
    pub api_key: &'a str,
    pub timeout_secs: u64,
    pub base_url: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub(super) struct PersistedModels<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Serialize)]
pub(super) struct PersistedAgent {
    pub max_steps: u32,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

#[derive(Serialize)]
pub(super) struct PersistedServices<'a> {
    pub search_url: &'a str,
    pub geocoding_url: &'a str,
    pub forecast_url: &'a str,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            llm: PersistedLlm {
                provider: config.llm.provider,
                api_key: &config.llm.api_key,
                timeout_secs: config.llm.timeout_secs,
                base_url: &config.llm.base_url,
                user_agent: &config.llm.user_agent,
            },
            models: PersistedModels {
                model: &config.models.model,
                temperature: config.models.temperature,
                max_tokens: config.models.max_tokens,
            },
            agent: PersistedAgent {
                max_steps: config.agent.max_steps,
                max_retries: config.agent.max_retries,
                timeout_secs: config.agent.timeout_secs,
            },
            services: PersistedServices {
                search_url: &config.services.search_url,
                geocoding_url: &config.services.geocoding_url,
                forecast_url: &config.services.forecast_url,
            },
        }
    }
}
