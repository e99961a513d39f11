//! In-process mock of the lab API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::TRACING_TARGET;

/// A canned response for one route.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

impl MockResponse {
    /// Responds with the given status and JSON body.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    /// Responds with `200 OK` and the given JSON body.
    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    /// Responds with the given status and a plain-text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

/// A request received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Value of the `Content-Type` header.
    pub content_type: Option<String>,
    /// Value of the `Authorization` header.
    pub authorization: Option<String>,
    /// Request body parsed as JSON, if it was JSON.
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<(Method, String), MockResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Builder for a mock lab API.
///
/// Unconfigured routes answer `404 Not Found` with an empty JSON object.
///
/// # Examples
///
/// ```rust,ignore
/// let server = MockLabApi::new()
///     .get("/equipment", MockResponse::ok(fixtures::equipment()))
///     .start()
///     .await?;
///
/// let url = format!("{}/equipment", server.base_url());
/// ```
#[derive(Debug, Default)]
pub struct MockLabApi {
    routes: HashMap<(Method, String), MockResponse>,
    prefix: String,
}

impl MockLabApi {
    /// Creates a mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves every route below the given path prefix (e.g. `/api`).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into().trim_end_matches('/').to_owned();
        self
    }

    /// Registers a response for a method and path.
    pub fn route(mut self, method: Method, path: &str, response: MockResponse) -> Self {
        self.routes.insert((method, path.to_owned()), response);
        self
    }

    /// Registers a response for `GET path`.
    pub fn get(self, path: &str, response: MockResponse) -> Self {
        self.route(Method::GET, path, response)
    }

    /// Registers a response for `POST path`.
    pub fn post(self, path: &str, response: MockResponse) -> Self {
        self.route(Method::POST, path, response)
    }

    /// Binds an ephemeral local port and starts serving in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(self) -> std::io::Result<MockServer> {
        let routes = self
            .routes
            .into_iter()
            .map(|((method, path), response)| ((method, format!("{}{path}", self.prefix)), response))
            .collect();

        let state = MockState {
            routes: Arc::new(routes),
            requests: Arc::default(),
        };
        let requests = state.requests.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = Router::new().fallback(respond).with_state(state);

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                tracing::error!(target: TRACING_TARGET, error = %err, "Mock lab API stopped");
            }
        });

        tracing::debug!(target: TRACING_TARGET, %addr, "Mock lab API listening");

        Ok(MockServer {
            base_url: format!("http://{addr}{}", self.prefix),
            requests,
            handle,
        })
    }
}

async fn respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    let recorded = RecordedRequest {
        method: method.clone(),
        path: uri.path().to_owned(),
        content_type: header_value(header::CONTENT_TYPE),
        authorization: header_value(header::AUTHORIZATION),
        body: serde_json::from_slice(&body).ok(),
    };

    tracing::debug!(
        target: TRACING_TARGET,
        method = %recorded.method,
        path = %recorded.path,
        "Mock lab API request"
    );

    state.requests.lock().await.push(recorded);

    match state.routes.get(&(method, uri.path().to_owned())) {
        Some(response) => response.clone().into_response(),
        None => MockResponse::json(404, Value::Object(Default::default())).into_response(),
    }
}

/// A running mock server. The server stops when this handle is dropped.
#[derive(Debug)]
pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Base URL of the server, including any configured prefix, without a
    /// trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Returns the most recent request, if any.
    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().await.last().cloned()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Returns a base URL on a local port that nothing listens on.
///
/// # Errors
///
/// Returns an error if no ephemeral port could be reserved.
pub async fn closed_port_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_serves_configured_route() {
        let server = MockLabApi::new()
            .get("/equipment", MockResponse::ok(json!([{"id": "EQ001"}])))
            .start()
            .await
            .unwrap();

        let response = reqwest::get(format!("{}/equipment", server.base_url()))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!([{"id": "EQ001"}])
        );

        let requests = server.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/equipment");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = MockLabApi::new().start().await.unwrap();

        let response = reqwest::get(format!("{}/missing", server.base_url()))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_prefix_is_part_of_base_url() {
        let server = MockLabApi::new()
            .with_prefix("/api/")
            .post("/analysis", MockResponse::ok(json!({"ok": true})))
            .start()
            .await
            .unwrap();

        assert!(server.base_url().ends_with("/api"));

        let response = reqwest::Client::new()
            .post(format!("{}/analysis", server.base_url()))
            .json(&json!({"range": "24h"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let request = server.last_request().await.unwrap();
        assert_eq!(request.path, "/api/analysis");
        assert_eq!(request.body, Some(json!({"range": "24h"})));
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
    }
}
