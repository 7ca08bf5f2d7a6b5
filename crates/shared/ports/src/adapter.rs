use realty_core::{ProviderId, ResultItem, SearchRequest};
use serde_json::Value;

use crate::error::MalformedResponse;
use crate::fetcher::HttpMethod;

/// Provider-specific request produced by an adapter
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRequest {
    /// JSON body for POST-based providers
    JsonBody(Value),
    /// Ordered query parameters for GET-based providers (not yet encoded)
    Query(Vec<(String, String)>),
}

impl ProviderRequest {
    /// Look up the first query parameter with the given name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        match self {
            ProviderRequest::Query(params) => params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            ProviderRequest::JsonBody(_) => None,
        }
    }

    pub fn json_body(&self) -> Option<&Value> {
        match self {
            ProviderRequest::JsonBody(body) => Some(body),
            ProviderRequest::Query(_) => None,
        }
    }
}

/// Port for translating between the unified schema and one provider's schema.
///
/// Implementations are stateless: `build_request` is a pure, total function
/// and `parse_response` fails only with `MalformedResponse`.
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> ProviderId;

    /// GET for query-based protocols, POST with a JSON body otherwise
    fn method(&self) -> HttpMethod;

    fn build_request(&self, request: &SearchRequest) -> ProviderRequest;

    fn parse_response(&self, raw: &Value) -> Result<Vec<ResultItem>, MalformedResponse>;
}
