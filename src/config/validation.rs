use anyhow::{Result, anyhow, bail};

use super::constants::MAX_RETRIES_LIMIT;
use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        let provider = config.llm.provider;
        return Err(anyhow!(
            "{} API key not found. Set {} or add it to {}",
            provider.display_name(),
            provider.api_key_env_var(),
            Config::config_path()?.display()
        ));
    }

    if config.llm.base_url.trim().is_empty() {
        bail!("LLM base URL cannot be empty");
    }

    if config.agent.max_steps == 0 {
        bail!("Agent max steps must be at least 1");
    }

    if config.agent.max_retries > MAX_RETRIES_LIMIT {
        bail!(
            "Agent max retries must be at most {MAX_RETRIES_LIMIT} (got {})",
            config.agent.max_retries
        );
    }

    if config.agent.timeout_secs == 0 || config.llm.timeout_secs == 0 {
        bail!("Timeouts must be greater than zero");
    }

    Ok(())
}
