use realty_core::ProviderId;
use realty_providers::{ProviderConfig, adapter_for};
use std::path::Path;
use thiserror::Error;

use super::types::GatewayConfigFile;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No enabled providers in config")]
    NoEnabledProviders,
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    #[error("Provider {0} must have a positive timeout_ms")]
    InvalidTimeout(String),
    #[error("outbound_capacity must be at least 1")]
    InvalidOutboundCapacity,
}

/// Load gateway configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: GatewayConfigFile = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<GatewayConfigFile, ConfigError> {
    let config: GatewayConfigFile = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<GatewayConfigFile, ConfigError> {
    let default_config = include_str!("gateway_config.json");
    load_config_from_str(default_config)
}

impl GatewayConfigFile {
    /// Get only enabled providers
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled).collect()
    }

    /// Get a specific provider by ID
    pub fn get_provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_providers().is_empty() {
            return Err(ConfigError::NoEnabledProviders);
        }

        for provider in &self.providers {
            if adapter_for(&ProviderId::new(&provider.id)).is_none() {
                return Err(ConfigError::UnknownProvider(provider.id.clone()));
            }
            if provider.timeout_ms == 0 {
                return Err(ConfigError::InvalidTimeout(provider.id.clone()));
            }
        }

        if self.server.outbound_capacity == 0 {
            return Err(ConfigError::InvalidOutboundCapacity);
        }

        Ok(())
    }
}
