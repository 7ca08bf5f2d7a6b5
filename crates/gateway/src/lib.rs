//! Realty Gateway
//!
//! Client-facing side of the aggregation service. A browser opens a
//! WebSocket, sends one search, and receives every listing from every
//! provider as soon as that provider answers. The connection closes once all
//! providers have reported.
//!
//! # Architecture
//!
//! ```text
//!   browser ──ws──► presentation::ws_handler ──► ConnectionRegistry
//!                          │
//!                          ▼ SearchRequest
//!              AggregationOrchestrator::run
//!            ┌─────────────┼─────────────┐
//!            ▼             ▼             ▼
//!     ProviderSource  ProviderSource  ProviderSource   (one task each)
//!            └─────────────┼─────────────┘
//!                          ▼ items / failures, as they arrive
//!                     SessionSink ──► outbound channel ──► browser
//! ```
//!
//! # Example
//!
//! ```ignore
//! use realty_gateway::{Gateway, config::load_default_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = load_default_config().unwrap();
//!     let gateway = Gateway::from_config(&config).unwrap();
//!     gateway.run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod messages;
pub mod orchestrator;
pub mod presentation;
pub mod registry;
pub mod session;

// Re-export commonly used types
pub use config::{GatewayConfigFile, ServerConfig};
pub use error::{ServerError, SinkClosed};
pub use messages::{ClientMessage, REQUEST_EVENT, RESPONSE_EVENT, ResponseData, ServerMessage};
pub use orchestrator::{AggregationOrchestrator, RoundSink, RoundSummary};
pub use presentation::AppState;
pub use registry::{ConnectionRegistry, Registration};
pub use session::{Session, SessionId, SessionSink};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use realty_ports::ProviderSource;
use realty_providers::{ReqwestFetcher, build_provider_clients};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// The gateway server
pub struct Gateway {
    pub config: ServerConfig,
    registry: ConnectionRegistry,
    orchestrator: Arc<AggregationOrchestrator>,
}

impl Gateway {
    pub fn new(config: ServerConfig, orchestrator: AggregationOrchestrator) -> Self {
        Gateway {
            config,
            registry: ConnectionRegistry::new(),
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Build a gateway wired to the real providers named in `file`
    pub fn from_config(file: &GatewayConfigFile) -> Result<Self, ServerError> {
        file.validate()?;

        let fetcher =
            ReqwestFetcher::new().map_err(|e| ServerError::HttpClient(e.to_string()))?;
        let sources: Vec<Arc<dyn ProviderSource>> =
            build_provider_clients(&file.providers, Arc::new(fetcher))?
                .into_iter()
                .map(|client| Arc::new(client) as Arc<dyn ProviderSource>)
                .collect();

        Ok(Self::new(
            file.server.clone(),
            AggregationOrchestrator::new(sources),
        ))
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Create the router with the WebSocket and health endpoints
    pub fn router(&self) -> Result<Router, ServerError> {
        let origin = HeaderValue::from_str(&self.config.allowed_origin)
            .map_err(|_| ServerError::InvalidOrigin(self.config.allowed_origin.clone()))?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET]);

        let state = Arc::new(AppState {
            registry: self.registry.clone(),
            orchestrator: Arc::clone(&self.orchestrator),
            outbound_capacity: self.config.outbound_capacity,
        });

        Ok(Router::new()
            .route("/ws", get(presentation::ws_handler))
            .route("/health", get(presentation::health_handler))
            .with_state(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http()))
    }

    /// Bind the configured address and serve until shutdown
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let router = self.router()?;

        let providers: Vec<String> = self
            .orchestrator
            .providers()
            .iter()
            .map(ToString::to_string)
            .collect();
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(
                providers = %providers.join(","),
                "Realty gateway listening on {}",
                addr
            );
        }

        axum::serve(listener, router)
            .await
            .map_err(ServerError::Serve)
    }
}
