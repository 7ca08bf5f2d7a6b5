use realty_providers::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Root configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfigFile {
    #[serde(default)]
    pub server: ServerConfig,
    pub providers: Vec<ProviderConfig>,
}

/// Listener and browser-facing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frontend origin allowed by the CORS layer
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Buffered outbound messages per session
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            outbound_capacity: default_outbound_capacity(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_outbound_capacity() -> usize {
    100
}
