//! Integration test harness for the SAMS assistant.
//!
//! Spawns in-process axum servers on `127.0.0.1:0` standing in for the
//! inventory-data service and the Gemini API, and serves the real router
//! against them.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sams-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let inventory = MockInventory::start().await;
//! let app = TestApp::start(&inventory, None).await;
//! let resp = app.query("asset summary please").await;
//! assert_eq!(resp.status(), 200);
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sams_assistant::config::{AssistantConfig, GeminiConfig, InventoryConfig};
use sams_assistant::routes;
use sams_assistant::state::AppState;
use secrecy::SecretString;
use serde_json::{Value, json};

/// API key the Gemini mock accepts.
pub const TEST_GEMINI_KEY: &str = "AIzaSyTest-integration-key-0123456789";

/// Bind `router` on an ephemeral local port and serve it in the background.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}

// =============================================================================
// Inventory-data service mock
// =============================================================================

/// A call received by the inventory mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub tool: String,
    pub params: Value,
}

/// A canned reply from the inventory mock.
#[derive(Debug, Clone)]
pub enum InventoryReply {
    /// `200 {"result": text}`
    Result(String),
    /// Error status with a FastAPI-style `{"detail": message}` body.
    Error(u16, String),
    /// `200` with a body that is not a call response.
    Garbage,
}

#[derive(Default)]
struct InventoryMockState {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<HashMap<String, InventoryReply>>,
}

/// In-process stand-in for the inventory-data service.
pub struct MockInventory {
    addr: SocketAddr,
    state: Arc<InventoryMockState>,
}

impl MockInventory {
    /// Start a mock that answers every tool with `"<tool> result"`.
    pub async fn start() -> Self {
        let state = Arc::new(InventoryMockState::default());
        let router = Router::new()
            .route("/tools", get(list_tools))
            .route("/call/{tool}", post(call_tool))
            .with_state(state.clone());
        let addr = serve(router).await;
        Self { addr, state }
    }

    /// Base URL to configure the assistant with.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Set the reply for one tool.
    pub fn reply(&self, tool: &str, reply: InventoryReply) {
        self.state
            .replies
            .lock()
            .expect("replies lock")
            .insert(tool.to_string(), reply);
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().expect("calls lock").clone()
    }
}

async fn list_tools() -> Json<Value> {
    let tools: Vec<Value> = sams_core::ToolName::ALL
        .iter()
        .map(|name| json!({"name": name.as_str(), "description": format!("Mock {name}")}))
        .collect();
    Json(json!({ "tools": tools }))
}

async fn call_tool(
    State(state): State<Arc<InventoryMockState>>,
    Path(tool): Path<String>,
    Json(params): Json<Value>,
) -> Response {
    state.calls.lock().expect("calls lock").push(RecordedCall {
        tool: tool.clone(),
        params,
    });

    let reply = state.replies.lock().expect("replies lock").get(&tool).cloned();
    match reply {
        None => Json(json!({ "result": format!("{tool} result") })).into_response(),
        Some(InventoryReply::Result(text)) => Json(json!({ "result": text })).into_response(),
        Some(InventoryReply::Error(status, detail)) => (
            StatusCode::from_u16(status).expect("valid status"),
            Json(json!({ "detail": detail })),
        )
            .into_response(),
        Some(InventoryReply::Garbage) => Json(json!({ "rows": [] })).into_response(),
    }
}

// =============================================================================
// Gemini API mock
// =============================================================================

/// A canned reply from the Gemini mock.
#[derive(Debug, Clone)]
pub enum GeminiReply {
    /// One candidate with this text.
    Text(String),
    /// A candidate with no parts.
    Empty,
    /// An error status with a Google API error body.
    Error(u16, String),
    /// `429 Too Many Requests`, with `Retry-After` seconds when given.
    RateLimited(Option<u64>),
}

struct GeminiMockState {
    reply: Mutex<GeminiReply>,
    prompts: Mutex<Vec<String>>,
}

/// In-process stand-in for the Gemini `generateContent` API.
pub struct MockGemini {
    addr: SocketAddr,
    state: Arc<GeminiMockState>,
}

impl MockGemini {
    /// Start a mock that answers every prompt with `reply`.
    pub async fn start(reply: GeminiReply) -> Self {
        let state = Arc::new(GeminiMockState {
            reply: Mutex::new(reply),
            prompts: Mutex::new(Vec::new()),
        });
        let router = Router::new()
            .route("/v1beta/models/{call}", post(generate_content))
            .with_state(state.clone());
        let addr = serve(router).await;
        Self { addr, state }
    }

    /// Gemini configuration pointing at this mock.
    pub fn config(&self) -> GeminiConfig {
        GeminiConfig {
            api_base: format!("http://{}/v1beta", self.addr),
            ..GeminiConfig::new(SecretString::from(TEST_GEMINI_KEY))
        }
    }

    /// Gemini configuration pointing at this mock with a key it rejects.
    pub fn config_with_wrong_key(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: SecretString::from("AIzaSyWrong-key-0000000000000000000"),
            ..self.config()
        }
    }

    /// Every prompt received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().expect("prompts lock").clone()
    }
}

async fn generate_content(
    State(state): State<Arc<GeminiMockState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(TEST_GEMINI_KEY) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if !call.ends_with(":generateContent") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.prompts.lock().expect("prompts lock").push(prompt);

    let reply = state.reply.lock().expect("reply lock").clone();
    match reply {
        GeminiReply::Text(text) => Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        }))
        .into_response(),
        GeminiReply::Empty => Json(json!({
            "candidates": [{"content": {"role": "model", "parts": []}, "finishReason": "SAFETY"}]
        }))
        .into_response(),
        GeminiReply::RateLimited(retry_after) => {
            let body = Json(json!({
                "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
            }));
            match retry_after {
                Some(seconds) => (
                    StatusCode::TOO_MANY_REQUESTS,
                    [("retry-after", seconds.to_string())],
                    body,
                )
                    .into_response(),
                None => (StatusCode::TOO_MANY_REQUESTS, body).into_response(),
            }
        }
        GeminiReply::Error(status, message) => (
            StatusCode::from_u16(status).expect("valid status"),
            Json(json!({
                "error": {"code": status, "message": message, "status": "INTERNAL"}
            })),
        )
            .into_response(),
    }
}

// =============================================================================
// The assistant under test
// =============================================================================

/// Assistant configuration wired to the given mocks.
pub fn test_config(inventory: &MockInventory, gemini: Option<&MockGemini>) -> AssistantConfig {
    AssistantConfig {
        host: std::net::Ipv4Addr::LOCALHOST.into(),
        port: 0,
        inventory: InventoryConfig {
            base_url: inventory.base_url(),
        },
        gemini: gemini.map(MockGemini::config),
        taxonomy_file: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The real assistant router served over HTTP.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Serve the assistant against the mocks. `gemini: None` selects the
    /// fallback composer.
    pub async fn start(inventory: &MockInventory, gemini: Option<&MockGemini>) -> Self {
        Self::start_with(&test_config(inventory, gemini)).await
    }

    /// Serve the assistant with an explicit configuration.
    pub async fn start_with(config: &AssistantConfig) -> Self {
        let state = AppState::from_config(config).expect("application state");
        let addr = serve(routes::app(state)).await;
        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST a question to the query endpoint.
    pub async fn query(&self, message: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/ai/query"))
            .json(&json!({ "message": message }))
            .send()
            .await
            .expect("query request")
    }
}
