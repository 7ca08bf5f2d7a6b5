use async_trait::async_trait;
use realty_core::{ProviderFailure, ProviderId, ProviderOutcome, SearchRequest};
use realty_ports::{
    FetchRequest, HttpFetcher, ProviderAdapter, ProviderRequest, ProviderSource,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Network target for one provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTarget {
    pub base_url: String,
    /// Extra headers sent with every call (API keys, user agent overrides)
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl ProviderTarget {
    pub fn new(base_url: impl Into<String>) -> Self {
        ProviderTarget {
            base_url: base_url.into(),
            headers: Vec::new(),
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
}

/// Performs one network call per round for a single provider.
///
/// Combines the provider's adapter with its target and the shared fetch
/// capability. Never returns an error: transport, status and decoding
/// failures all become a `ProviderOutcome::Failed`.
#[derive(Clone)]
pub struct ProviderClient {
    adapter: Arc<dyn ProviderAdapter>,
    target: ProviderTarget,
    fetcher: Arc<dyn HttpFetcher>,
}

impl ProviderClient {
    pub fn new(
        adapter: Arc<dyn ProviderAdapter>,
        target: ProviderTarget,
        fetcher: Arc<dyn HttpFetcher>,
    ) -> Self {
        ProviderClient {
            adapter,
            target,
            fetcher,
        }
    }

    pub fn target(&self) -> &ProviderTarget {
        &self.target
    }

    /// Build the outbound HTTP request for a search.
    ///
    /// Fails only when the configured base URL cannot carry a query string.
    pub fn fetch_request(&self, request: &SearchRequest) -> Result<FetchRequest, url::ParseError> {
        let mut fetch = match self.adapter.build_request(request) {
            ProviderRequest::Query(params) => {
                let url = Url::parse_with_params(&self.target.base_url, &params)?;
                FetchRequest::get(url.as_str())
            }
            ProviderRequest::JsonBody(body) => FetchRequest::post_json(&self.target.base_url, &body),
        };

        for (name, value) in &self.target.headers {
            fetch = fetch.with_header(name, value);
        }
        if let Some(timeout) = self.target.timeout {
            fetch = fetch.with_timeout(timeout);
        }

        Ok(fetch)
    }

    pub async fn fetch_results(&self, request: &SearchRequest) -> ProviderOutcome {
        let provider = self.adapter.provider();

        let fetch = match self.fetch_request(request) {
            Ok(fetch) => fetch,
            Err(e) => {
                warn!(provider = %provider, error = %e, "Invalid provider URL");
                return ProviderOutcome::Failed(ProviderFailure::transport(
                    provider,
                    format!("invalid provider URL: {}", e),
                ));
            }
        };

        debug!(
            provider = %provider,
            method = fetch.method.as_str(),
            url = %fetch.url,
            "Calling provider"
        );

        let response = match self.fetcher.fetch(fetch).await {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = %provider, error = %e, "Provider unreachable");
                return ProviderOutcome::Failed(ProviderFailure::transport(provider, e.to_string()));
            }
        };

        if !response.is_success() {
            warn!(
                provider = %provider,
                status = response.status,
                "Provider returned an error status"
            );
            return ProviderOutcome::Failed(ProviderFailure::upstream(provider, response.body));
        }

        let raw: Value = match serde_json::from_str(&response.body) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(provider = %provider, error = %e, "Provider body is not JSON");
                return ProviderOutcome::Failed(ProviderFailure::malformed(
                    provider,
                    format!("response body is not valid JSON: {}", e),
                ));
            }
        };

        match self.adapter.parse_response(&raw) {
            Ok(items) => {
                debug!(provider = %provider, items = items.len(), "Provider responded");
                ProviderOutcome::Items(items)
            }
            Err(e) => {
                warn!(provider = %provider, error = %e, "Unexpected provider response shape");
                ProviderOutcome::Failed(ProviderFailure::malformed(provider, e.to_string()))
            }
        }
    }
}

#[async_trait]
impl ProviderSource for ProviderClient {
    fn provider(&self) -> ProviderId {
        self.adapter.provider()
    }

    async fn fetch_results(&self, request: &SearchRequest) -> ProviderOutcome {
        ProviderClient::fetch_results(self, request).await
    }
}
