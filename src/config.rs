//! Configuration management for the harvester.

use std::path::Path;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const DEFAULT_MAX_RESULTS: u64 = 1000;
const DEFAULT_MIN_PRICE: u64 = 0;
const DEFAULT_MAX_PRICE: u64 = 100_000;

/// Top-level configuration for the harvester.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Search endpoint configuration.
    pub api: ApiConfig,
    /// The price domain to enumerate.
    pub domain: DomainConfig,
}

/// Settings for the search endpoint.
#[derive(Deserialize, Clone, Debug)]
pub struct ApiConfig {
    /// Base URL of the search endpoint.
    pub base_url: String,
    /// Maximum number of products the endpoint returns per query.
    pub max_results: u64,
}

/// The price domain over which enumeration is desired.
#[derive(Deserialize, Clone, Debug)]
pub struct DomainConfig {
    /// Inclusive lower bound of the price domain.
    pub min_price: u64,
    /// Inclusive upper bound of the price domain.
    pub max_price: u64,
}

impl Settings {
    /// Load the configuration from the optional TOML file at `config_path`,
    /// with `HARVESTER`-prefixed environment variables applied on top. The
    /// explicit double-underscore separator is needed to address the nested
    /// structure, e.g. `HARVESTER_API__BASE_URL`.
    pub fn new_from_path(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("HARVESTER")
            .separator("__")
            .prefix_separator("_");

        let mut cfg_builder = Config::builder();
        cfg_builder = cfg_builder.set_default("api.max_results", DEFAULT_MAX_RESULTS)?;
        cfg_builder = cfg_builder.set_default("domain.min_price", DEFAULT_MIN_PRICE)?;
        cfg_builder = cfg_builder.set_default("domain.max_price", DEFAULT_MAX_PRICE)?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.max_results == 0 {
            return Err(ConfigError::Message(
                "[api] max_results must be at least 1".to_string(),
            ));
        }
        if self.domain.min_price > self.domain.max_price {
            return Err(ConfigError::Message(
                "[domain] min_price cannot exceed max_price".to_string(),
            ));
        }

        Ok(())
    }
}
