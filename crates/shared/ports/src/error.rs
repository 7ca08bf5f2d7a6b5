use thiserror::Error;

/// A provider response that could not be mapped to result items
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct MalformedResponse(pub String);

impl MalformedResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MalformedResponse(message.into())
    }
}

impl From<serde_json::Error> for MalformedResponse {
    fn from(err: serde_json::Error) -> Self {
        MalformedResponse(err.to_string())
    }
}

/// No response was obtained from the upstream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),
}
