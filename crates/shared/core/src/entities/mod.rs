mod outcome;
mod property_type;
mod result_item;
mod search_request;

pub use outcome::{FailureKind, ProviderFailure, ProviderOutcome};
pub use property_type::PropertyType;
pub use result_item::ResultItem;
pub use search_request::SearchRequest;
