//! Shared helpers: a local fake Discord webhook and request builders.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use pubsub_relay::{build_router, AppState, RelayConfig};
use pubsub_relay_core::PUBSUB_MESSAGE_PUBLISHED as MESSAGE_PUBLISHED;

// ============================================================================
// Fake Discord webhook
// ============================================================================

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Value>>>,
}

/// A webhook endpoint on 127.0.0.1 that records every JSON body it receives.
pub struct FakeDiscord {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl FakeDiscord {
    /// Start an endpoint that answers every POST with `status`.
    pub async fn start(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/webhook", post(record))
            .with_state(FakeState {
                status,
                received: received.clone(),
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/webhook", addr),
            received,
        }
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn record(State(state): State<FakeState>, Json(body): Json<Value>) -> (StatusCode, &'static str) {
    state.received.lock().unwrap().push(body);
    let reply = if state.status == StatusCode::NO_CONTENT {
        ""
    } else {
        "{\"message\": \"Unknown Webhook\", \"code\": 10015}"
    };
    (state.status, reply)
}

/// An address nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/webhook", addr)
}

// ============================================================================
// Log capture
// ============================================================================

/// Formatted log output captured from a scoped subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let buffer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || buffer.clone())
            .with_ansi(false)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

// ============================================================================
// Host
// ============================================================================

/// Router serving `sendDiscord` against `webhook_url`.
pub fn relay_app(webhook_url: &str) -> Router {
    let config = RelayConfig {
        webhook_url: webhook_url.to_string(),
        ..Default::default()
    };
    build_router(AppState::from_config(&config).unwrap())
}

/// Router serving `HelloPubSub`.
pub fn hello_app() -> Router {
    let config = RelayConfig {
        function_target: "HelloPubSub".to_string(),
        ..Default::default()
    };
    build_router(AppState::from_config(&config).unwrap())
}

// ============================================================================
// Requests
// ============================================================================

/// `MessagePublishedData` JSON for a message with `text` and `attributes`.
pub fn message_data(text: &str, attributes: Value) -> Value {
    json!({
        "message": {
            "data": STANDARD.encode(text),
            "attributes": attributes,
            "messageId": "1001",
            "publishTime": "2024-05-01T10:00:00Z"
        },
        "subscription": "projects/demo/subscriptions/relay"
    })
}

/// Binary-mode CloudEvent request carrying `data`.
pub fn binary_request(data: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("ce-id", "1001")
        .header("ce-source", "//pubsub.googleapis.com/projects/demo/topics/events")
        .header("ce-type", MESSAGE_PUBLISHED)
        .header("ce-specversion", "1.0")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(data).unwrap()))
        .unwrap()
}

/// Structured-mode CloudEvent request carrying `data`.
pub fn structured_request(data: &Value) -> Request<Body> {
    let event = json!({
        "specversion": "1.0",
        "id": "1001",
        "source": "//pubsub.googleapis.com/projects/demo/topics/events",
        "type": MESSAGE_PUBLISHED,
        "datacontenttype": "application/json",
        "data": data
    });
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/cloudevents+json")
        .body(Body::from(serde_json::to_vec(&event).unwrap()))
        .unwrap()
}

/// Raw Pub/Sub push request (no CloudEvent headers).
pub fn push_request(data: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(data).unwrap()))
        .unwrap()
}
