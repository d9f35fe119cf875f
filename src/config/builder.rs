use anyhow::Result;

use super::types::{AgentSettings, Config, LlmProvider, LlmSettings, ModelSettings, ServiceSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) models: ModelSettings,
    pub(super) agent: AgentSettings,
    pub(super) services: ServiceSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            models: ModelSettings::default(),
            agent: AgentSettings::default(),
            services: ServiceSettings::default(),
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            llm: config.llm,
            models: config.models,
            agent: config.agent,
            services: config.services,
        }
    }

    /// Switch provider; endpoint and model fall back to the new provider's defaults.
    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        if self.llm.provider != provider {
            self.llm.provider = provider;
            self.llm.base_url = provider.default_base_url().to_string();
            self.models.model = provider.default_model().to_string();
        }
        self
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_agent<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut AgentSettings),
    {
        update(&mut self.agent);
        self
    }

    pub fn with_services<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ServiceSettings),
    {
        update(&mut self.services);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            llm: self.llm,
            models: self.models,
            agent: self.agent,
            services: self.services,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
