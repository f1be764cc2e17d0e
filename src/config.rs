use crate::cli::Cli;
use crate::client::DEFAULT_BASE_URL;
use crate::http_client::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub network: NetworkConfig,
}

/// Service location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL the `query` and `application.wadl` methods live under
    pub base_url: String,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent sent with every request
    pub user_agent: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl Config {
    /// HTTP client settings derived from the network section
    pub fn http_client_config(&self) -> HttpClientConfig {
        let defaults = HttpClientConfig::default();
        HttpClientConfig {
            timeout_seconds: self.network.timeout_seconds,
            user_agent: self
                .network
                .user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub fn load_config(cli: &Cli) -> Result<Config> {
        let mut config = Config::default();

        if let Some(config_path) = &cli.config {
            config = Self::load_from_file(config_path)?;
        } else if let Some(found_config) = Self::find_config_file()? {
            config = found_config;
        }

        config = Self::apply_environment_overrides(config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Result<Option<Config>> {
        let config_names = [
            "quakequery.toml",
            "quakequery.json",
            ".quakequery.toml",
            ".quakequery.json",
        ];

        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path)?));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("quakequery");
            for name in &config_names {
                let path = app_config_dir.join(name);
                if path.exists() {
                    return Ok(Some(Self::load_from_file(&path)?));
                }
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides using the system environment
    pub fn apply_environment_overrides(config: Config) -> Result<Config> {
        Self::apply_environment_overrides_with(&SystemEnvProvider, config)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(base_url) = env.get("QUAKEQUERY_BASE_URL") {
            config.endpoint.base_url = base_url;
        }

        if let Some(timeout) = env.get("QUAKEQUERY_TIMEOUT") {
            config.network.timeout_seconds = timeout.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid QUAKEQUERY_TIMEOUT value: {}", timeout))
            })?;
        }

        if let Some(user_agent) = env.get("QUAKEQUERY_USER_AGENT") {
            config.network.user_agent = Some(user_agent);
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if let Some(base_url) = &cli.base_url {
            config.endpoint.base_url = base_url.clone();
        }
        if let Some(timeout) = cli.timeout {
            config.network.timeout_seconds = timeout;
        }
        config
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        let base_url = &config.endpoint.base_url;
        let parsed = url::Url::parse(base_url).map_err(|e| {
            ConfigError::Validation(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        if parsed.cannot_be_a_base() || !base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "Base URL '{}' must be a hierarchical URL ending with '/'",
                base_url
            )));
        }

        if config.network.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
