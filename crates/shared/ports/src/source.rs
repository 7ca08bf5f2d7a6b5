use async_trait::async_trait;
use realty_core::{ProviderId, ProviderOutcome, SearchRequest};

/// Port for one provider's participation in an aggregation round.
///
/// Every failure path is folded into the returned outcome, so callers can
/// treat all providers uniformly.
#[async_trait]
pub trait ProviderSource: Send + Sync {
    fn provider(&self) -> ProviderId;

    async fn fetch_results(&self, request: &SearchRequest) -> ProviderOutcome;
}
