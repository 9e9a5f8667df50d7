//! HTTP transport implementation.
//!
//! One axum router dispatches by path:
//! - `/sse` (and below): rmcp streamable HTTP service, one protocol session
//!   per client, all backed by clones of the same [`McpServer`]
//! - `/mcp`: JSON-RPC over POST, answered inline
//! - anything else: 404

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::config::{DIRECT_PATH, HttpConfig, STREAMING_PATH};
use super::TransportError;
use crate::core::{McpServer, Result};
use crate::domains::tools::ToolError;

/// Protocol version reported by the direct transport.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Failed tool call, keeping the error kind for clients.
    pub fn tool_error(id: Option<Value>, err: &ToolError) -> Self {
        let code = if err.is_client_error() { -32602 } else { -32603 };
        let mut response = Self::error(id, code, err.to_string());
        if let Some(error) = response.error.as_mut() {
            error.data = Some(json!({ "kind": err.kind() }));
        }
        response
    }
}

/// Application state shared across direct-transport handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run the HTTP transport until the listener stops.
    pub async fn run(self, server: McpServer) -> Result<()> {
        let addr = self.config.address();
        info!("Starting transport: {}", self.config.description());

        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Streaming: {}", STREAMING_PATH);
        info!("  → Direct:    POST {}", DIRECT_PATH);

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the request router for both transports.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let factory_server = server.clone();
    let streaming = StreamableHttpService::new(
        move || Ok(factory_server.clone()),
        Arc::new(LocalSessionManager::default()),
        Default::default(),
    );

    let mut app = Router::new()
        .route(DIRECT_PATH, post(handle_rpc))
        .nest_service(STREAMING_PATH, streaming)
        .fallback(not_found)
        .with_state(AppState { server })
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Handle JSON-RPC requests on the direct transport.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    match process_request(&state, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Process a JSON-RPC request; notifications produce no response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(state, request),

        "ping" => JsonRpcResponse::success(request.id, json!({})),

        "tools/list" => handle_tools_list(state, request).await,

        "tools/call" => handle_tools_call(state, request).await,

        // Stateless transport: notifications are accepted and dropped
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            return None;
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };

    Some(response)
}

/// Handle initialize request.
fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        }
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
async fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    match state.server.list_tool_descriptors().await {
        Ok(descriptors) => {
            let tools: Vec<Value> = descriptors.iter().map(|d| d.to_json()).collect();
            JsonRpcResponse::success(request.id, json!({ "tools": tools }))
        }
        Err(e) => JsonRpcResponse::tool_error(request.id, &e),
    }
}

/// Handle tools/call request.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => serde_json::Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return JsonRpcResponse::invalid_params(request.id, "Tool arguments must be an object");
        }
    };

    info!("Processing tools/call request: {}", name);

    match state.server.invoke_tool(&name, &arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result.to_json()),
        Err(e) => {
            warn!("Tool {} failed: {}", name, e);
            JsonRpcResponse::tool_error(request.id, &e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::firecrawl::RemoteScrapeResult;
    use crate::domains::tools::definitions::firecrawl::testing::MockContentService;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router_with(content: MockContentService) -> (McpServer, Router) {
        let server = McpServer::with_content_service(Config::default(), Arc::new(content));
        let router = build_router(server.clone(), &HttpConfig::default());
        (server, router)
    }

    async fn post_rpc(router: &Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(DIRECT_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn call(id: u64, name: &str, arguments: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (_, router) = router_with(MockContentService::unconfigured());
        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_streaming_path_is_routed() {
        let (_, router) = router_with(MockContentService::unconfigured());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(STREAMING_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_direct_call_add() {
        let (_, router) = router_with(MockContentService::unconfigured());
        let (status, body) = post_rpc(&router, call(1, "add", json!({ "a": 2, "b": 3 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(
            body["result"],
            json!({ "content": [{ "type": "text", "text": "5" }] })
        );
    }

    #[tokio::test]
    async fn test_direct_divide_by_zero_is_result() {
        let (_, router) = router_with(MockContentService::unconfigured());
        let (_, body) = post_rpc(
            &router,
            call(2, "calculate", json!({ "operation": "divide", "a": 10, "b": 0 })),
        )
        .await;

        assert!(body.get("error").is_none());
        assert_eq!(body["result"]["error"]["code"], "invalid_argument");
        assert_eq!(body["result"]["content"], json!([]));
    }

    #[tokio::test]
    async fn test_direct_failures_are_errors() {
        let (_, router) = router_with(MockContentService::unconfigured());

        let (_, body) = post_rpc(&router, call(3, "firecrawl_search", json!({ "query": "q" }))).await;
        assert_eq!(body["error"]["code"], -32603);
        assert_eq!(body["error"]["data"]["kind"], "configuration_error");

        let (_, body) = post_rpc(&router, call(4, "add", json!({ "a": "two", "b": 3 }))).await;
        assert_eq!(body["error"]["code"], -32602);
        assert_eq!(body["error"]["data"]["kind"], "invalid_argument");
        assert!(body["error"]["message"].as_str().unwrap().contains("'a'"));

        let (_, body) = post_rpc(&router, call(5, "nope", json!({}))).await;
        assert_eq!(body["error"]["data"]["kind"], "unknown_tool");
    }

    #[tokio::test]
    async fn test_direct_scrape() {
        let content = MockContentService::configured().with_scrape(RemoteScrapeResult {
            success: true,
            markdown: Some("# Hi".to_string()),
            links: Some(vec!["http://a".to_string()]),
            error: None,
        });
        let (_, router) = router_with(content);
        let (_, body) = post_rpc(
            &router,
            call(
                6,
                "firecrawl_scrape",
                json!({ "url": "https://example.com", "formats": ["markdown", "links"] }),
            ),
        )
        .await;

        assert_eq!(
            body["result"]["content"],
            json!([
                { "type": "text", "text": "# Hi" },
                { "type": "text", "text": "Links found on page:\n- http://a" }
            ])
        );
    }

    #[tokio::test]
    async fn test_tools_list_and_protocol_methods() {
        let (_, router) = router_with(MockContentService::unconfigured());

        let (_, body) = post_rpc(
            &router,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }),
        )
        .await;
        assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 4);

        let (_, body) = post_rpc(
            &router,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "initialize", "params": {} }),
        )
        .await;
        assert_eq!(body["result"]["serverInfo"]["name"], "firecrawl-mcp-server");

        let (_, body) = post_rpc(
            &router,
            json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32601);

        let (_, body) = post_rpc(
            &router,
            json!({ "jsonrpc": "1.0", "id": 4, "method": "ping" }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_direct_notification_is_accepted_without_body() {
        let (_, router) = router_with(MockContentService::unconfigured());
        let (status, body) = post_rpc(
            &router,
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, Value::Null);
    }

    /// POST one message to the streaming transport.
    ///
    /// Returns the status, the session id header and the first JSON-RPC
    /// message carrying an `id` found in the event stream.
    async fn post_streaming(
        router: &Router,
        session_id: Option<&str>,
        body: Value,
    ) -> (StatusCode, Option<String>, Option<Value>) {
        let mut request = Request::builder()
            .method("POST")
            .uri(STREAMING_PATH)
            .header("host", "localhost")
            .header("content-type", "application/json")
            .header("accept", "application/json, text/event-stream");
        if let Some(id) = session_id {
            request = request.header("mcp-session-id", id);
        }

        let response = router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let session = response
            .headers()
            .get("mcp-session-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut body = response.into_body();
        let mut buffer = String::new();
        let message = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(frame) = body.frame().await {
                let Ok(data) = frame.unwrap().into_data() else {
                    continue;
                };
                buffer.push_str(&String::from_utf8_lossy(&data));
                let found = buffer
                    .lines()
                    .filter_map(|line| line.strip_prefix("data:"))
                    .filter_map(|data| serde_json::from_str::<Value>(data.trim()).ok())
                    .find(|message| message.get("id").is_some());
                if found.is_some() {
                    return found;
                }
            }
            None
        })
        .await
        .unwrap();

        (status, session, message)
    }

    #[tokio::test]
    async fn test_streaming_call_initializes_shared_session() {
        let (server, router) = router_with(MockContentService::unconfigured());

        let (status, session, message) = post_streaming(
            &router,
            None,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": { "name": "router-test", "version": "0.0.0" }
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let session = session.expect("streaming transport should assign a session id");
        let message = message.unwrap();
        assert_eq!(message["result"]["serverInfo"]["name"], "firecrawl-mcp-server");

        let (status, _, _) = post_streaming(
            &router,
            Some(&session),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(!server.session().is_initialized());

        let (_, _, message) = post_streaming(
            &router,
            Some(&session),
            call(2, "calculate", json!({ "operation": "divide", "a": 10, "b": 0 })),
        )
        .await;
        let result = &message.unwrap()["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["error"]["code"], "invalid_argument");

        assert!(server.session().is_initialized());
        let shared = server.session();

        let (_, _, message) = post_streaming(
            &router,
            Some(&session),
            call(3, "add", json!({ "a": 2, "b": 3 })),
        )
        .await;
        assert_eq!(message.unwrap()["result"]["content"][0]["text"], "5");

        // The direct transport reaches the session the streaming call built.
        let (_, body) = post_rpc(&router, call(4, "add", json!({ "a": 1, "b": 1 }))).await;
        assert_eq!(body["result"]["content"][0]["text"], "2");
        assert!(Arc::ptr_eq(&shared, &server.session()));
    }

    #[tokio::test]
    async fn test_direct_call_initializes_shared_session() {
        let (server, router) = router_with(MockContentService::unconfigured());
        assert!(!server.session().is_initialized());

        post_rpc(&router, call(1, "add", json!({ "a": 1, "b": 1 }))).await;

        assert!(server.session().is_initialized());
    }
}
