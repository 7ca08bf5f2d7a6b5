use serde::{Deserialize, Serialize};
use std::fmt;

use super::ResultItem;
use crate::values::ProviderId;

/// Why a provider contributed nothing to a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// No response was obtained (connect failure, timeout)
    TransportError,
    /// A response arrived with a non-success status
    UpstreamError,
    /// The response body did not have the expected shape
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::TransportError => "TransportError",
            FailureKind::UpstreamError => "UpstreamError",
            FailureKind::MalformedResponse => "MalformedResponse",
        };
        f.write_str(name)
    }
}

/// Failure descriptor for one provider in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub kind: FailureKind,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(provider: ProviderId, kind: FailureKind, message: impl Into<String>) -> Self {
        ProviderFailure {
            provider,
            kind,
            message: message.into(),
        }
    }

    pub fn transport(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(provider, FailureKind::TransportError, message)
    }

    pub fn upstream(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(provider, FailureKind::UpstreamError, message)
    }

    pub fn malformed(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(provider, FailureKind::MalformedResponse, message)
    }
}

/// Rendered as the error string clients receive: `provider: Kind: message`
impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.provider, self.kind, self.message)
    }
}

/// Result of one provider's participation in a round
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Items(Vec<ResultItem>),
    Failed(ProviderFailure),
}

impl ProviderOutcome {
    /// Number of listings carried (0 for failures)
    pub fn item_count(&self) -> usize {
        match self {
            ProviderOutcome::Items(items) => items.len(),
            ProviderOutcome::Failed(_) => 0,
        }
    }
}
