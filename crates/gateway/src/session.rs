use async_trait::async_trait;
use realty_core::{ProviderFailure, ResultItem, Timestamp};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::error::SinkClosed;
use crate::messages::ServerMessage;
use crate::orchestrator::RoundSink;
use crate::registry::ConnectionRegistry;

/// Unique identifier of one client connection
pub type SessionId = Uuid;

/// One connected client.
///
/// Cloning shares the outbound channel. The socket writer finishes once every
/// clone has been dropped.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    outbound: mpsc::Sender<ServerMessage>,
    connected_at: Timestamp,
}

impl Session {
    pub fn new(outbound: mpsc::Sender<ServerMessage>) -> Self {
        Session {
            id: Uuid::new_v4(),
            outbound,
            connected_at: chrono::Utc::now(),
        }
    }

    /// Open a session together with the receiving end of its outbound channel
    pub fn open(capacity: usize) -> (Self, mpsc::Receiver<ServerMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Session::new(tx), rx)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Queue one message for the client
    pub async fn send(&self, message: ServerMessage) -> Result<(), SinkClosed> {
        self.outbound.send(message).await.map_err(|_| SinkClosed)
    }
}

/// Round sink writing to a session.
///
/// The first failed write deregisters the session, so a vanished client is
/// removed as soon as it is noticed rather than when the round ends.
pub struct SessionSink {
    session: Session,
    registry: ConnectionRegistry,
}

impl SessionSink {
    pub fn new(session: Session, registry: ConnectionRegistry) -> Self {
        SessionSink { session, registry }
    }

    async fn deliver(&self, message: ServerMessage) -> Result<(), SinkClosed> {
        let result = self.session.send(message).await;
        if result.is_err() && self.registry.remove(&self.session.id()).is_some() {
            debug!(session_id = %self.session.id(), "Outbound channel closed, session removed");
        }
        result
    }
}

#[async_trait]
impl RoundSink for SessionSink {
    async fn emit_item(&mut self, item: ResultItem) -> Result<(), SinkClosed> {
        self.deliver(ServerMessage::item(item)).await
    }

    async fn emit_failure(&mut self, failure: ProviderFailure) -> Result<(), SinkClosed> {
        self.deliver(ServerMessage::failure(&failure)).await
    }
}
