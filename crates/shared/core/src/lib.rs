//! Realty Core Domain
//!
//! Pure domain types for the realty aggregation gateway: the unified search
//! request clients send, the unified listing shape every provider is
//! normalized into, and the per-provider outcome of an aggregation round.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    FailureKind, PropertyType, ProviderFailure, ProviderOutcome, ResultItem, SearchRequest,
};
pub use error::ProtocolError;
pub use values::{ProviderId, Timestamp};
