//! In-process stand-in for the Tally REST backend.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, put};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub role: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn accepted() -> Self {
        Self::json(StatusCode::OK, json!({ "success": true }))
    }

    pub fn rejected(message: &str) -> Self {
        Self::json(
            StatusCode::OK,
            json!({ "success": false, "message": message }),
        )
    }

    pub fn json(status: StatusCode, body: Value) -> Self {
        Self::raw(status, body.to_string())
    }

    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Script {
    path: String,
    body: Value,
    reply: Reply,
}

#[derive(Default)]
struct BackendState {
    scripts: Mutex<Vec<Script>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockBackend {
    base_url: String,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let app = Router::new()
            .route("/api/admin/features/{user_id}", patch(handle))
            .route("/api/features/{feature_key}/assign/role/{role}", put(handle))
            .route("/api/inventory/{item_id}", patch(handle))
            .route("/api/notifications/{notification_id}/read", patch(handle))
            .route("/api/accounts/{account_id}/balance", patch(handle))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer requests to `path` whose JSON body equals `body` with `reply`.
    /// Anything unscripted is accepted.
    pub fn reply_when(&self, path: &str, body: Value, reply: Reply) {
        self.state.scripts.lock().unwrap().push(Script {
            path: path.to_string(),
            body,
            reply,
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        authorization: header_value(header::AUTHORIZATION.as_str()),
        role: header_value("x-user-role"),
        body: body.clone(),
    });

    let reply = state
        .scripts
        .lock()
        .unwrap()
        .iter()
        .find(|script| script.path == path && script.body == body)
        .map(|script| script.reply.clone())
        .unwrap_or_else(Reply::accepted);

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}
