//! gavel-api - HTTP API server for the gavel evaluation engine

mod ingest;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use gavel_core::{defaults, EvalConfig};
use gavel_eval::Evaluator;
use ingest::{extract_exchange, extract_passages, ChatStrategy};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    evaluator: Arc<Evaluator>,
}

// =============================================================================
// API ERRORS
// =============================================================================

/// HTTP-facing error. The body always carries a `detail` field so clients
/// have a single place to look for the human-readable message.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Timeout(u64),
    Internal(String),
}

impl From<gavel_core::Error> for ApiError {
    fn from(err: gavel_core::Error) -> Self {
        match err {
            gavel_core::Error::Validation(msg) => Self::BadRequest(msg),
            gavel_core::Error::Timeout { budget_ms } => Self::Timeout(budget_ms),
            // Internal details stay in the logs, not the response body
            other => {
                tracing::error!(error = %other, "evaluation failed");
                Self::Internal("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Timeout(budget_ms) => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Scoring timed out after {}ms", budget_ms),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// POST /evaluate - score a (query, response, context) triple.
async fn evaluate(
    State(state): State<AppState>,
    Json(request): Json<gavel_core::EvaluationRequest>,
) -> Result<Json<gavel_core::EvaluationResult>, ApiError> {
    let result = state.evaluator.evaluate(&request).await?;
    Ok(Json(result))
}

/// GET /health - liveness probe.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "engine": "gavel",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /ingest/context - reduce an arbitrary JSON export to context passages.
async fn ingest_context(Json(payload): Json<Value>) -> Json<Value> {
    let passages = extract_passages(&payload);
    Json(json!({
        "count": passages.len(),
        "context": passages,
    }))
}

#[derive(Debug, Deserialize)]
struct ChatQuery {
    strategy: Option<String>,
}

/// POST /ingest/chat - reduce a chat-log export to one (query, response) pair.
async fn ingest_chat(
    Query(params): Query<ChatQuery>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let strategy = match params.strategy.as_deref() {
        Some(s) => ChatStrategy::from_str_loose(s)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown chat strategy: {}", s)))?,
        None => ChatStrategy::default(),
    };

    let exchange = extract_exchange(&payload, strategy).ok_or_else(|| {
        ApiError::BadRequest("No user/assistant exchange found in payload".to_string())
    })?;

    Ok(Json(json!({
        "strategy": strategy.to_string(),
        "query": exchange.query,
        "response": exchange.response,
    })))
}

// =============================================================================
// ROUTER / SERVER
// =============================================================================

fn app(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate))
        .route("/health", get(health))
        .route("/ingest/context", post(ingest_context))
        .route("/ingest/chat", post(ingest_chat))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        // Local scoring service consumed by browser dashboards; no credentials
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "gavel_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gavel_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("gavel-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::SERVER_PORT);

    let config = EvalConfig::from_env();
    info!(
        relevance_min = config.thresholds.relevance_min,
        completeness_min = config.thresholds.completeness_min,
        hallucination_max = config.thresholds.hallucination_max,
        timeout_ms = config.timeout_ms,
        "Evaluation config loaded"
    );

    let state = AppState {
        evaluator: Arc::new(Evaluator::new(config)),
    };

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState {
            evaluator: Arc::new(Evaluator::new(EvalConfig::default())),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_evaluate_pass() {
        let request = json_request(
            "/evaluate",
            json!({
                "query": "What is the capital of France?",
                "response": "The capital of France is Paris.",
                "context": ["France is a country in Western Europe. Its capital is Paris."]
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["verdict"]["status"], "PASS");
        assert_eq!(body["verdict"]["reasons"].as_array().unwrap().len(), 3);
        assert!(body["metrics"]["relevance"].as_f64().unwrap() > 0.5);
        assert_eq!(body["metrics"]["hallucination"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_evaluate_missing_context_field_defaults_empty() {
        let request = json_request(
            "/evaluate",
            json!({
                "query": "What is the capital of France?",
                "response": "The capital of France is Paris."
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["metrics"]["hallucination"].as_f64().unwrap(), 1.0);
        assert_eq!(body["verdict"]["status"], "FAIL");
    }

    #[tokio::test]
    async fn test_evaluate_blank_query_is_bad_request() {
        let request = json_request(
            "/evaluate",
            json!({"query": "   ", "response": "something", "context": []}),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("query"));
    }

    #[tokio::test]
    async fn test_ingest_context() {
        let request = json_request(
            "/ingest/context",
            json!({
                "results": [
                    {"id": 1, "embedding": [0.5], "text": "Passage one."},
                    {"id": 2, "embedding": [0.1], "text": "Passage two."}
                ]
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["context"][0], "Passage one.");
        assert_eq!(body["context"][1], "Passage two.");
    }

    #[tokio::test]
    async fn test_ingest_chat_default_strategy() {
        let request = json_request(
            "/ingest/chat",
            json!({
                "messages": [
                    {"role": "user", "content": "first question"},
                    {"role": "assistant", "content": "first answer"},
                    {"role": "user", "content": "second question"},
                    {"role": "assistant", "content": "second answer"}
                ]
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["strategy"], "last_exchange");
        assert_eq!(body["query"], "second question");
        assert_eq!(body["response"], "second answer");
    }

    #[tokio::test]
    async fn test_ingest_chat_unknown_strategy() {
        let request = json_request("/ingest/chat?strategy=bogus", json!({"messages": []}));
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ingest_chat_no_exchange() {
        let request = json_request("/ingest/chat", json!({"notes": "not a chat log"}));
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("exchange"));
    }

    #[test]
    fn test_api_error_status_mapping() {
        let cases = [
            (
                ApiError::BadRequest("bad".into()).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Timeout(200).into_response().status(),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApiError::Internal("oops".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }
}
