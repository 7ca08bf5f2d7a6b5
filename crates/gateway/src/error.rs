//! Error types for the gateway

use realty_providers::RegistryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the gateway from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// The receiving side of a round has gone away
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("sink closed")]
pub struct SinkClosed;
