use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};
use tracing::debug;

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::{apply_api_key, apply_env_overrides};
use super::types::{FileConfig, LlmProvider, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".tripmate/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Defaults, then the config file, then environment overrides. Not validated.
    pub fn load() -> Result<Self> {
        apply_env_overrides(Self::file_builder()?)?.build()
    }

    /// Defaults and the config file only. Used as the base for `save` so values
    /// coming from the environment never end up on disk.
    pub fn load_persisted() -> Result<Self> {
        Self::file_builder()?.build()
    }

    /// [`Config::load`] followed by command-line overrides. Switching provider
    /// resets endpoint and model to that provider's defaults and reads its key
    /// from the environment.
    pub fn load_with_overrides(
        provider: Option<LlmProvider>,
        model: Option<String>,
    ) -> Result<Self> {
        let config = Self::load()?;
        let mut builder = ConfigBuilder::from_config(config);

        if let Some(provider) = provider.filter(|p| *p != builder.llm.provider) {
            builder = builder
                .with_provider(provider)
                .with_llm(|llm| llm.api_key.clear());
            builder = apply_api_key(builder)?;
        }

        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            builder = builder.with_models(|models| models.model = model.trim().to_string());
        }

        builder.build()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn file_builder() -> Result<ConfigBuilder> {
        let path = Self::config_path()?;
        let builder = ConfigBuilder::new();

        if path.exists() {
            debug!(path = %path.display(), "loading config file");
            return Self::apply_file(builder, &path);
        }
        Ok(builder)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
    }
}

impl FileConfig {
    pub fn apply(self, mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
        if let Some(llm) = self.llm {
            if let Some(provider) = llm.provider {
                let parsed = provider
                    .parse::<LlmProvider>()
                    .with_context(|| format!("Invalid provider '{provider}' in config file"))?;
                builder = builder.with_provider(parsed);
            }
            builder = builder.with_llm(|settings| {
                if let Some(api_key) = llm.api_key {
                    settings.api_key = api_key;
                }
                if let Some(timeout) = llm.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(base_url) = llm.base_url {
                    settings.base_url = base_url;
                }
                if let Some(user_agent) = llm.user_agent {
                    settings.user_agent = user_agent;
                }
            });
        }

        if let Some(models) = self.models {
            builder = builder.with_models(|settings| {
                if let Some(model) = models.model {
                    settings.model = model;
                }
                if let Some(temperature) = models.temperature {
                    settings.temperature = temperature;
                }
                if let Some(max_tokens) = models.max_tokens {
                    settings.max_tokens = max_tokens;
                }
            });
        }

        if let Some(agent) = self.agent {
            builder = builder.with_agent(|settings| {
                if let Some(max_steps) = agent.max_steps {
                    settings.max_steps = max_steps;
                }
                if let Some(max_retries) = agent.max_retries {
                    settings.max_retries = max_retries;
                }
                if let Some(timeout) = agent.timeout_secs {
                    settings.timeout_secs = timeout;
                }
            });
        }

        if let Some(services) = self.services {
            builder = builder.with_services(|settings| {
                if let Some(url) = services.search_url {
                    settings.search_url = url;
                }
                if let Some(url) = services.geocoding_url {
                    settings.geocoding_url = url;
                }
                if let Some(url) = services.forecast_url {
                    settings.forecast_url = url;
                }
            });
        }

        Ok(builder)
    }
}
