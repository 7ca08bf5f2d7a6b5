mod health;
mod websocket;

pub use health::health_handler;
pub use websocket::ws_handler;

use std::sync::Arc;

use crate::orchestrator::AggregationOrchestrator;
use crate::registry::ConnectionRegistry;

/// Shared state for the HTTP and WebSocket handlers
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub orchestrator: Arc<AggregationOrchestrator>,
    /// Buffered outbound messages per session
    pub outbound_capacity: usize,
}
