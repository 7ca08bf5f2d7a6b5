//! WebSocket integration tests
//!
//! Starts a real gateway on a local port with scripted providers and talks to
//! it the way the browser does.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use realty_core::{ProviderFailure, ProviderId, ProviderOutcome, ResultItem, SearchRequest};
use realty_gateway::{
    AggregationOrchestrator, ConnectionRegistry, Gateway, ServerConfig,
};
use realty_ports::ProviderSource;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// Test Fixtures
// ============================================================================

struct ScriptedSource {
    id: ProviderId,
    delay: Duration,
    outcome: ProviderOutcome,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProviderSource for ScriptedSource {
    fn provider(&self) -> ProviderId {
        self.id.clone()
    }

    async fn fetch_results(&self, _request: &SearchRequest) -> ProviderOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

fn listing(title: &str, price: f64) -> ResultItem {
    ResultItem {
        title: title.to_string(),
        image_url: format!("https://img.test/{}.jpg", price),
        price,
        area_square_meters: 42.0,
        rooms: 2,
        address: "Tallinn".to_string(),
        listing_url: Some(format!("https://listing.test/{}", price)),
    }
}

fn scripted(
    id: ProviderId,
    delay_ms: u64,
    outcome: ProviderOutcome,
    calls: &Arc<AtomicUsize>,
) -> Arc<dyn ProviderSource> {
    Arc::new(ScriptedSource {
        id,
        delay: Duration::from_millis(delay_ms),
        outcome,
        calls: Arc::clone(calls),
    })
}

/// Three providers: two answer with listings, one with an upstream error
fn default_sources(calls: &Arc<AtomicUsize>) -> Vec<Arc<dyn ProviderSource>> {
    vec![
        scripted(
            ProviderId::kinnisvara24(),
            20,
            ProviderOutcome::Items(vec![
                listing("Vabriku 47", 500.0),
                listing("Kopli 3", 450.0),
            ]),
            calls,
        ),
        scripted(
            ProviderId::rendin(),
            10,
            ProviderOutcome::Failed(ProviderFailure::upstream(
                ProviderId::rendin(),
                "service unavailable",
            )),
            calls,
        ),
        scripted(
            ProviderId::city24(),
            40,
            ProviderOutcome::Items(vec![listing("Tööstuse 12", 480.0)]),
            calls,
        ),
    ]
}

/// Start a test server and return its address with a handle on its registry
async fn start_test_server(sources: Vec<Arc<dyn ProviderSource>>) -> (SocketAddr, ConnectionRegistry) {
    let gateway = Gateway::new(ServerConfig::default(), AggregationOrchestrator::new(sources));
    let registry = gateway.registry().clone();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        gateway.serve(listener).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, registry)
}

async fn connect(addr: SocketAddr) -> WsStream {
    let url = format!("ws://{}/ws", addr);
    let (ws, _response) = connect_async(&url).await.expect("Failed to connect");
    ws
}

async fn send_json(ws: &mut WsStream, value: Value) {
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("send");
}

fn search(data: Value) -> Value {
    json!({ "event": "real-estate", "data": data })
}

/// Read frames until the server closes the connection
async fn read_until_close(ws: &mut WsStream) -> (Vec<Value>, bool) {
    let mut messages = Vec::new();
    loop {
        match tokio::time::timeout(Duration::from_secs(5), ws.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                messages.push(serde_json::from_str(text.as_str()).expect("json frame"));
            }
            Ok(Some(Ok(Message::Close(_)))) => return (messages, true),
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(_))) | Ok(None) => return (messages, false),
            Err(_) => panic!("timed out waiting for the server"),
        }
    }
}

async fn wait_for_empty(registry: &ConnectionRegistry) {
    for _ in 0..100 {
        if registry.size() == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("registry still holds {} sessions", registry.size());
}

// ============================================================================
// Round Tests
// ============================================================================

#[tokio::test]
async fn test_round_streams_every_outcome_then_closes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, registry) = start_test_server(default_sources(&calls)).await;
    let mut ws = connect(addr).await;

    send_json(
        &mut ws,
        search(json!({
            "districts": ["Kalamaja"],
            "minPrice": 200,
            "maxPrice": 600,
            "minRooms": 1,
            "maxRooms": 3,
            "propertyType": "rent"
        })),
    )
    .await;

    let (messages, closed) = read_until_close(&mut ws).await;
    assert!(closed, "server should send a close frame");
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    assert!(
        messages
            .iter()
            .all(|m| m["event"] == "real-estate-json-data-response")
    );

    let mut titles: Vec<&str> = messages
        .iter()
        .filter_map(|m| m["data"]["title"].as_str())
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Kopli 3", "Tööstuse 12", "Vabriku 47"]);

    let errors: Vec<&str> = messages.iter().filter_map(|m| m["data"].as_str()).collect();
    assert_eq!(errors, vec!["rendin: UpstreamError: service unavailable"]);

    let vabriku = messages
        .iter()
        .find(|m| m["data"]["title"] == "Vabriku 47")
        .unwrap();
    assert_eq!(vabriku["data"]["price"], 500.0);
    assert_eq!(vabriku["data"]["areaSquareMeters"], 42.0);
    assert_eq!(vabriku["data"]["imageUrl"], "https://img.test/500.jpg");

    wait_for_empty(&registry).await;
}

#[tokio::test]
async fn test_kinnisvara24_order_preserved_on_the_wire() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, _registry) = start_test_server(default_sources(&calls)).await;
    let mut ws = connect(addr).await;

    send_json(&mut ws, search(json!({ "districts": ["Pirita"] }))).await;
    let (messages, _) = read_until_close(&mut ws).await;

    let kinnisvara: Vec<&str> = messages
        .iter()
        .filter_map(|m| m["data"]["title"].as_str())
        .filter(|t| *t == "Vabriku 47" || *t == "Kopli 3")
        .collect();
    assert_eq!(kinnisvara, vec!["Vabriku 47", "Kopli 3"]);
}

#[tokio::test]
async fn test_empty_results_close_without_messages() {
    let calls = Arc::new(AtomicUsize::new(0));
    let sources = vec![
        scripted(ProviderId::rendin(), 5, ProviderOutcome::Items(vec![]), &calls),
        scripted(ProviderId::city24(), 5, ProviderOutcome::Items(vec![]), &calls),
    ];
    let (addr, _registry) = start_test_server(sources).await;
    let mut ws = connect(addr).await;

    send_json(&mut ws, search(json!({ "districts": ["Nõmme"] }))).await;
    let (messages, closed) = read_until_close(&mut ws).await;

    assert!(closed);
    assert!(messages.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Protocol Error Tests
// ============================================================================

#[tokio::test]
async fn test_missing_districts_rejected_before_round() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, registry) = start_test_server(default_sources(&calls)).await;
    let mut ws = connect(addr).await;

    send_json(&mut ws, search(json!({ "minPrice": 100 }))).await;
    let (messages, closed) = read_until_close(&mut ws).await;

    assert!(closed);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["event"], "real-estate-json-data-response");
    assert!(
        messages[0]["data"]
            .as_str()
            .unwrap()
            .contains("districts")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    wait_for_empty(&registry).await;
}

#[tokio::test]
async fn test_inverted_price_range_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, _registry) = start_test_server(default_sources(&calls)).await;
    let mut ws = connect(addr).await;

    send_json(
        &mut ws,
        search(json!({ "districts": ["Kesklinn"], "minPrice": 900, "maxPrice": 300 })),
    )
    .await;
    let (messages, _) = read_until_close(&mut ws).await;

    assert_eq!(messages.len(), 1);
    assert!(
        messages[0]["data"]
            .as_str()
            .unwrap()
            .contains("greater than maxPrice")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unexpected_event_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, _registry) = start_test_server(default_sources(&calls)).await;
    let mut ws = connect(addr).await;

    send_json(&mut ws, json!({ "event": "subscribe", "data": {} })).await;
    let (messages, closed) = read_until_close(&mut ws).await;

    assert!(closed);
    assert_eq!(messages.len(), 1);
    assert!(messages[0]["data"].as_str().unwrap().contains("subscribe"));
}

// ============================================================================
// Registry Tests
// ============================================================================

#[tokio::test]
async fn test_session_registered_while_connected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, registry) = start_test_server(default_sources(&calls)).await;

    let ws = connect(addr).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(registry.size(), 1);

    drop(ws);
    wait_for_empty(&registry).await;
}

#[tokio::test]
async fn test_disconnect_mid_round_removes_session() {
    let calls = Arc::new(AtomicUsize::new(0));
    let sources = vec![scripted(
        ProviderId::city24(),
        1_000,
        ProviderOutcome::Items(vec![listing("Kopli 3", 450.0)]),
        &calls,
    )];
    let (addr, registry) = start_test_server(sources).await;
    let mut ws = connect(addr).await;

    send_json(&mut ws, search(json!({ "districts": ["Kalamaja"] }))).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(registry.size(), 1);

    ws.close(None).await.expect("close");
    drop(ws);

    // Removed well before the slow provider answers
    wait_for_empty(&registry).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_sessions_are_independent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, registry) = start_test_server(default_sources(&calls)).await;

    let mut first = connect(addr).await;
    let mut second = connect(addr).await;

    send_json(&mut first, search(json!({ "districts": ["Kalamaja"] }))).await;
    send_json(&mut second, search(json!({ "districts": ["Pirita"] }))).await;

    let (a, b) = tokio::join!(read_until_close(&mut first), read_until_close(&mut second));
    assert_eq!(a.0.len(), 4);
    assert_eq!(b.0.len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 6);

    wait_for_empty(&registry).await;
}

// ============================================================================
// Health Endpoint
// ============================================================================

#[tokio::test]
async fn test_health_reports_session_count() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, registry) = start_test_server(default_sources(&calls)).await;
    let url = format!("http://{}/health", addr);

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok", "sessions": 0 }));

    let ws = connect(addr).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["sessions"], 1);

    drop(ws);
    wait_for_empty(&registry).await;
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (addr, _registry) = start_test_server(default_sources(&calls)).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/health", addr))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}
