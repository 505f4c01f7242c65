//! Shared utilities for integration testing: an in-process mock CDN API.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use cdn_sync::api::CdnClient;
use cdn_sync::config::SyncConfig;

pub const API_PREFIX: &str = "/client/v4";
pub const TEST_EMAIL: &str = "user@example.com";
pub const TEST_KEY: &str = "abc123";

/// A request as seen by the mock.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub email: Option<String>,
    pub key: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    zones: Vec<(String, String)>,
    settings: Vec<(String, Value)>,
    failing_keys: HashSet<String>,
    canned: Option<(StatusCode, String)>,
    delay: Option<Duration>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

/// Mock of the zones and settings endpoints, backed by in-memory state so
/// applied changes show up on the next fetch.
pub struct MockCdn {
    addr: SocketAddr,
    state: Shared,
}

#[allow(dead_code)]
impl MockCdn {
    /// Start the mock on an ephemeral port.
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn root_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn config(&self) -> SyncConfig {
        let mut config = SyncConfig::default();
        config.api.root_url = self.root_url();
        config.auth.email = TEST_EMAIL.into();
        config.auth.key = TEST_KEY.into();
        config
    }

    pub fn client(&self) -> CdnClient {
        CdnClient::new(&self.config()).unwrap()
    }

    pub fn with_zone(&self, id: &str, name: &str) -> &Self {
        self.state.lock().unwrap().zones.push((id.into(), name.into()));
        self
    }

    pub fn with_setting(&self, id: &str, value: Value) -> &Self {
        self.state.lock().unwrap().settings.push((id.into(), value));
        self
    }

    /// Make every PATCH of `key` fail with an error envelope.
    pub fn fail_key(&self, key: &str) -> &Self {
        self.state.lock().unwrap().failing_keys.insert(key.into());
        self
    }

    /// Answer every request with a fixed status and body.
    pub fn respond_with(&self, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.lock().unwrap().canned = Some((status, body.into()));
        self
    }

    /// Hold every response back for `delay` before answering.
    pub fn delay_responses(&self, delay: Duration) -> &Self {
        self.state.lock().unwrap().delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn patches(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::PATCH)
            .collect()
    }

    pub fn setting(&self, id: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .settings
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value.clone())
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn success(result: Value) -> (StatusCode, String) {
    let body = json!({"success": true, "errors": [], "messages": [], "result": result});
    (StatusCode::OK, body.to_string())
}

fn failure(status: StatusCode, code: i64, message: &str) -> (StatusCode, String) {
    let body = json!({
        "success": false,
        "errors": [{"code": code, "message": message}],
        "messages": [],
        "result": null
    });
    (status, body.to_string())
}

fn setting_json(id: &str, value: &Value) -> Value {
    json!({
        "id": id,
        "value": value,
        "modified_on": "2014-07-09T11:50:56.595672Z",
        "editable": true
    })
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let delay = shared.lock().unwrap().delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut state = shared.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        email: header(&headers, "x-auth-email"),
        key: header(&headers, "x-auth-key"),
        content_type: header(&headers, "content-type"),
        body: body.clone(),
    });

    if let Some(canned) = state.canned.clone() {
        return canned;
    }

    let Some(path) = uri.path().strip_prefix(API_PREFIX) else {
        return failure(StatusCode::NOT_FOUND, 7000, "No route for that URI");
    };
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["zones"]) => {
            let zones: Vec<Value> = state
                .zones
                .iter()
                .map(|(id, name)| json!({"id": id, "name": name}))
                .collect();
            success(Value::Array(zones))
        }
        ("GET", ["zones", _, "settings"]) => {
            let settings: Vec<Value> = state
                .settings
                .iter()
                .map(|(id, value)| setting_json(id, value))
                .collect();
            success(Value::Array(settings))
        }
        ("PATCH", ["zones", _, "settings", key]) => {
            if state.failing_keys.contains(*key) {
                return failure(StatusCode::OK, 1007, "Invalid value for zone setting");
            }
            let Ok(update) = serde_json::from_str::<Value>(&body) else {
                return failure(StatusCode::BAD_REQUEST, 1001, "Invalid request body");
            };
            let Some(value) = update.get("value").cloned() else {
                return failure(StatusCode::BAD_REQUEST, 1001, "Missing value");
            };
            match state.settings.iter_mut().find(|(id, _)| id.as_str() == *key) {
                Some(entry) => {
                    entry.1 = value.clone();
                    success(setting_json(key, &value))
                }
                None => failure(StatusCode::BAD_REQUEST, 1004, "Unknown zone setting"),
            }
        }
        _ => failure(StatusCode::NOT_FOUND, 7000, "No route for that URI"),
    }
}
