//! Error types for the providers crate

use thiserror::Error;

/// Errors raised while building the provider registry at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider {id} has an invalid base URL: {reason}")]
    InvalidBaseUrl { id: String, reason: String },
}
