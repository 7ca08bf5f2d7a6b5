//! Realty Ports
//!
//! Port definitions (traits) for the realty aggregation gateway.
//! These define the boundaries between the aggregation logic and the
//! outside world: one adapter per upstream provider, and the HTTP fetch
//! capability the surrounding runtime supplies.

mod adapter;
mod error;
mod fetcher;
mod source;

pub use adapter::{ProviderAdapter, ProviderRequest};
pub use error::{MalformedResponse, TransportFailure};
pub use fetcher::{FetchRequest, FetchResponse, HttpFetcher, HttpMethod};
pub use source::ProviderSource;
