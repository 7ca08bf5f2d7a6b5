use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Unique identifier for an upstream listing provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        ProviderId(id.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        ProviderId::new(s)
    }
}

impl From<String> for ProviderId {
    fn from(s: String) -> Self {
        ProviderId::new(s)
    }
}

/// Well-known provider identifiers
impl ProviderId {
    pub fn kinnisvara24() -> Self {
        ProviderId::new("kinnisvara24")
    }

    pub fn rendin() -> Self {
        ProviderId::new("rendin")
    }

    pub fn city24() -> Self {
        ProviderId::new("city24")
    }
}
