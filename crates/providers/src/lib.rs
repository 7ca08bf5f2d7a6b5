//! Realty Providers
//!
//! Upstream side of the aggregation gateway. Provides:
//! - One adapter per listing provider (Kinnisvara24, Rendin, City24)
//! - `ProviderClient`: adapter + network target + fetch capability
//! - `ReqwestFetcher`: the production HTTP transport
//! - The static registry that turns configuration into clients
//!
//! ## Architecture
//!
//! ```text
//!        SearchRequest
//!              │
//!    ┌─────────▼──────────┐
//!    │   ProviderClient   │──── build_request ───► ProviderAdapter
//!    │                    │◄─── parse_response ───
//!    └─────────┬──────────┘
//!              │ FetchRequest (GET query / POST json)
//!    ┌─────────▼──────────┐
//!    │    HttpFetcher     │  (ReqwestFetcher in production)
//!    └─────────┬──────────┘
//!              ▼
//!     Kinnisvara24 / Rendin / City24
//! ```

pub mod adapters;
pub mod client;
pub mod error;
pub mod http;
pub mod registry;
pub mod settings;

// Re-export commonly used types
pub use adapters::{City24Adapter, Kinnisvara24Adapter, RendinAdapter};
pub use client::{ProviderClient, ProviderTarget};
pub use error::RegistryError;
pub use http::ReqwestFetcher;
pub use registry::{adapter_for, build_provider_clients, known_providers};
pub use settings::ProviderConfig;
