use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::client::ProviderTarget;

/// Configuration for a single upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider identifier, must name a known adapter (e.g. "rendin")
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether this provider takes part in rounds
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Search endpoint
    pub base_url: String,
    /// Extra headers sent with every call
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Network-level timeout for one call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Network target used by the provider's client
    pub fn target(&self) -> ProviderTarget {
        let target = self
            .headers
            .iter()
            .fold(ProviderTarget::new(&self.base_url), |target, (name, value)| {
                target.with_header(name, value)
            });
        target.with_timeout(self.timeout())
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    10_000
}
