use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use realty_core::{ProtocolError, SearchRequest};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::AppState;
use crate::messages::{ClientMessage, ServerMessage};
use crate::registry::ConnectionRegistry;
use crate::session::{Session, SessionId, SessionSink};

/// Handle WebSocket upgrade
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One session: a single request, one round, then close
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let (session, mut rx) = Session::open(state.outbound_capacity);
    let session_id = session.id();
    let Some(registration) = state.registry.register(&session) else {
        warn!(session_id = %session_id, "Session id already registered, closing");
        drop(session);
        let _ = sender.send(Message::Close(None)).await;
        return;
    };
    info!(
        session_id = %session_id,
        sessions = state.registry.size(),
        "Session connected"
    );

    // Forward queued messages; the close frame goes out once every
    // session handle has been dropped
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "Failed to encode outbound message");
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    match next_request(&mut receiver).await {
        Some(Ok(request)) => {
            debug!(session_id = %session_id, districts = request.districts.len(), "Round requested");
            let watcher = watch_disconnect(receiver, state.registry.clone(), session_id);

            let mut sink = SessionSink::new(session.clone(), state.registry.clone());
            let summary = state.orchestrator.run(request, &mut sink).await;
            drop(sink);
            watcher.abort();

            info!(
                session_id = %session_id,
                items = summary.items,
                failures = summary.failures,
                delivered = summary.delivered,
                elapsed_ms = summary.elapsed.as_millis() as u64,
                "Round complete"
            );
        }
        Some(Err(e)) => {
            warn!(session_id = %session_id, error = %e, "Rejected request");
            let _ = session.send(ServerMessage::protocol_error(&e)).await;
        }
        None => {
            debug!(session_id = %session_id, "Client left before sending a request");
        }
    }

    // Cleanup
    drop(registration);
    drop(session);
    let _ = send_task.await;

    info!(
        session_id = %session_id,
        sessions = state.registry.size(),
        "Session closed"
    );
}

/// Wait for the first text frame. `None` when the client leaves first.
async fn next_request(
    receiver: &mut SplitStream<WebSocket>,
) -> Option<Result<SearchRequest, ProtocolError>> {
    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => return Some(ClientMessage::parse(text.as_str())),
            Message::Close(_) => return None,
            _ => {}
        }
    }
    None
}

/// Deregister the session as soon as the client goes away mid-round
fn watch_disconnect(
    mut receiver: SplitStream<WebSocket>,
    registry: ConnectionRegistry,
    session_id: SessionId,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
        if registry.remove(&session_id).is_some() {
            info!(session_id = %session_id, "Client disconnected mid-round");
        }
    })
}
