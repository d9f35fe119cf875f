use anyhow::{Context, Result, anyhow};
use std::env;
use std::str::FromStr;

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("TRIPMATE_PROVIDER")? {
        let provider = provider_raw
            .parse::<LlmProvider>()
            .with_context(|| format!("Failed to parse TRIPMATE_PROVIDER value '{provider_raw}'"))?;
        builder = builder.with_provider(provider);
    }

    if let Some(base_url) = env_string("TRIPMATE_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    builder = apply_api_key(builder)?;

    if let Some(timeout) = env_parse::<u64>("TRIPMATE_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(model) = env_string("TRIPMATE_MODEL")? {
        builder = builder.with_models(|models| models.model = model);
    }

    if let Some(temperature) = env_parse::<f32>("TRIPMATE_TEMPERATURE")? {
        builder = builder.with_models(|models| models.temperature = temperature);
    }

    if let Some(max_tokens) = env_parse::<u32>("TRIPMATE_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(timeout) = env_parse::<u64>("TRIPMATE_AGENT_TIMEOUT_SECS")? {
        builder = builder.with_agent(|agent| agent.timeout_secs = timeout);
    }

    if let Some(max_steps) = env_parse::<u32>("TRIPMATE_MAX_STEPS")? {
        builder = builder.with_agent(|agent| agent.max_steps = max_steps);
    }

    if let Some(max_retries) = env_parse::<u32>("TRIPMATE_MAX_RETRIES")? {
        builder = builder.with_agent(|agent| agent.max_retries = max_retries);
    }

    if let Some(url) = env_string("TRIPMATE_SEARCH_URL")? {
        builder = builder.with_services(|services| services.search_url = url);
    }

    if let Some(url) = env_string("TRIPMATE_GEOCODING_URL")? {
        builder = builder.with_services(|services| services.geocoding_url = url);
    }

    if let Some(url) = env_string("TRIPMATE_FORECAST_URL")? {
        builder = builder.with_services(|services| services.forecast_url = url);
    }

    Ok(builder)
}

/// Take the API key from the variable belonging to the builder's current provider.
pub fn apply_api_key(builder: ConfigBuilder) -> Result<ConfigBuilder> {
    let provider = builder.llm.provider;
    match env_string(provider.api_key_env_var())? {
        Some(api_key) => Ok(builder.with_llm(|llm| llm.api_key = api_key)),
        None => Ok(builder),
    }
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_string(key)? {
        Some(value) => {
            let parsed = value
                .parse::<T>()
                .with_context(|| format!("Failed to parse {key} value '{value}'"))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
