use anyhow::{Result, bail};
use std::str::FromStr;

use crate::config::{Config, ConfigBuilder, LlmProvider, MAX_RETRIES_LIMIT};

use super::args::ConfigArgs;
use super::util::mask_api_key;

/// Apply `config` flags to the persisted settings. Returns whether anything changed.
pub(crate) fn apply_updates(
    config: Config,
    provider: Option<&str>,
    model: Option<&str>,
    args: &ConfigArgs,
) -> Result<(Config, bool)> {
    let mut builder = ConfigBuilder::from_config(config.clone());

    if let Some(provider) = provider {
        builder = builder.with_provider(LlmProvider::from_str(provider)?);
    }

    if let Some(model) = model.map(str::trim).filter(|m| !m.is_empty()) {
        builder = builder.with_models(|models| models.model = model.to_string());
    }

    if let Some(max_retries) = args.max_retries {
        if max_retries > MAX_RETRIES_LIMIT {
            bail!("--max-retries must be at most {MAX_RETRIES_LIMIT}");
        }
    }

    builder = builder
        .with_llm(|llm| {
            if let Some(api_key) = &args.api_key {
                llm.api_key = api_key.trim().to_string();
            }
            if let Some(timeout) = args.timeout {
                llm.timeout_secs = timeout;
            }
        })
        .with_agent(|agent| {
            if let Some(timeout) = args.agent_timeout {
                agent.timeout_secs = timeout;
            }
            if let Some(max_steps) = args.max_steps {
                agent.max_steps = max_steps;
            }
            if let Some(max_retries) = args.max_retries {
                agent.max_retries = max_retries;
            }
        });

    let updated = builder.build()?;
    let changed = updated != config;
    Ok((updated, changed))
}

pub(crate) fn handle_config(
    provider: Option<&str>,
    model: Option<&str>,
    args: &ConfigArgs,
) -> Result<()> {
    if provider.is_none() && model.is_none() && !args.has_updates() {
        print_config(&Config::load()?)?;
        return Ok(());
    }

    let (updated, changed) = apply_updates(Config::load_persisted()?, provider, model, args)?;
    if changed {
        updated.save()?;
        println!(
            "✅ Configuration saved to {}",
            Config::config_path()?.display()
        );
    } else {
        println!("ℹ️  Configuration unchanged.");
    }

    let effective = Config::load()?;
    print_config(&effective)?;

    if effective.llm.api_key.trim().is_empty() {
        println!(
            "⚠️  {} API key is not configured. Set {} or run 'tripmate config --api-key <KEY>'.",
            effective.llm.provider.display_name(),
            effective.llm.provider.api_key_env_var()
        );
    }

    Ok(())
}

fn print_config(config: &Config) -> Result<()> {
    println!("📋 Current configuration:");
    println!(
        "   Provider: {} ({})",
        config.llm.provider,
        config.llm.provider.display_name()
    );
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!("   Base URL: {}", config.llm.base_url);
    println!("   Model: {}", config.models.model);
    println!("   Temperature: {}", config.models.temperature);
    println!("   Max Tokens: {}", config.models.max_tokens);
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!(
        "   Agent: {} steps, {} retries, {}s limit",
        config.agent.max_steps, config.agent.max_retries, config.agent.timeout_secs
    );
    println!("   Search: {}", config.services.search_url);
    println!(
        "   Weather: {} / {}",
        config.services.geocoding_url, config.services.forecast_url
    );
    println!("   Config file: {}", Config::config_path()?.display());
    Ok(())
}
