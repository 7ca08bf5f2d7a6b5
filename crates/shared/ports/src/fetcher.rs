use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::TransportFailure;

/// HTTP method used to reach a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A fully-formed outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Network-level deadline for this call; expiry is a transport failure
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        FetchRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// POST with a JSON body and the matching content type
    pub fn post_json(url: impl Into<String>, body: &Value) -> Self {
        FetchRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/json; charset=UTF-8".to_string(),
            )],
            body: Some(body.to_string()),
            timeout: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text of an upstream response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        FetchResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for the HTTP transport.
///
/// Implementations must return `Err` only when no response was obtained at
/// all; any status code, including errors, is an `Ok` response.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportFailure>;
}
