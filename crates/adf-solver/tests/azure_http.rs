use adf_solver::{
    AzureOpenAiClient, AzureOpenAiConfig, ChatCompletion, FailureKind, GeneratorConfig,
    SolutionGenerator, SolveError,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    deployment: Arc<Mutex<Option<String>>>,
    api_version: Arc<Mutex<Option<String>>>,
    api_key: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(endpoint: String) -> AzureOpenAiClient {
    AzureOpenAiClient::new(AzureOpenAiConfig::new(endpoint, "test-key").with_timeout(5)).unwrap()
}

async fn fixed_status(status: StatusCode, body: &'static str) -> AzureOpenAiClient {
    let app = Router::new().route(
        "/openai/deployments/:deployment/chat/completions",
        post(move || async move { (status, body) }),
    );
    client_for(spawn(app).await)
}

#[tokio::test]
async fn test_completion_request_shape() {
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/openai/deployments/:deployment/chat/completions",
            post(
                |State(c): State<Captured>,
                 Path(deployment): Path<String>,
                 Query(params): Query<HashMap<String, String>>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    *c.deployment.lock().unwrap() = Some(deployment);
                    *c.api_version.lock().unwrap() = params.get("api-version").cloned();
                    *c.api_key.lock().unwrap() = headers
                        .get("api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(|s| s.to_string());
                    *c.body.lock().unwrap() = Some(body);
                    Json(json!({
                        "id": "chatcmpl-1",
                        "object": "chat.completion",
                        "choices": [{
                            "index": 0,
                            "message": {"role": "assistant", "content": "  Check the linked service credentials.\n"},
                            "finish_reason": "stop"
                        }]
                    }))
                },
            ),
        )
        .with_state(captured.clone());
    let client = client_for(spawn(app).await);
    let generator = SolutionGenerator::new(Arc::new(client), GeneratorConfig::default());

    let links = vec!["https://stackoverflow.com/q/1".to_string()];
    let explanation = generator
        .generate("Linked service test connection fails", &links)
        .await
        .unwrap();

    assert_eq!(explanation, "Check the linked service credentials.");
    assert_eq!(captured.deployment.lock().unwrap().as_deref(), Some("gpt-4o-mini"));
    assert_eq!(
        captured.api_version.lock().unwrap().as_deref(),
        Some("2024-02-15-preview")
    );
    assert_eq!(captured.api_key.lock().unwrap().as_deref(), Some("test-key"));

    let body = captured.body.lock().unwrap().clone().unwrap();
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.4).abs() < 1e-6);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "You are a helpful support assistant.");
    assert_eq!(messages[1]["role"], "user");
    let prompt = messages[1]["content"].as_str().unwrap();
    assert!(prompt.contains("'Linked service test connection fails'"));
    assert!(prompt.contains("https://stackoverflow.com/q/1"));
}

#[tokio::test]
async fn test_unauthorized_is_configuration_failure() {
    let client = fixed_status(StatusCode::UNAUTHORIZED, r#"{"error":{"code":"401"}}"#).await;
    let request = adf_solver::ChatRequest::new(0.4);

    let err = client.complete(&request).await.unwrap_err();
    assert!(matches!(err, SolveError::Unauthorized { status: 401, .. }));
    assert_eq!(err.kind(), FailureKind::Configuration);
}

#[tokio::test]
async fn test_rate_limit_is_transient() {
    let client = fixed_status(StatusCode::TOO_MANY_REQUESTS, "try later").await;
    let err = client
        .complete(&adf_solver::ChatRequest::new(0.4))
        .await
        .unwrap_err();

    assert!(matches!(err, SolveError::RateLimited(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_model_failure() {
    let client = fixed_status(StatusCode::OK, "this is not json").await;
    let err = client
        .complete(&adf_solver::ChatRequest::new(0.4))
        .await
        .unwrap_err();

    assert!(matches!(err, SolveError::MalformedResponse(_)));
    assert_eq!(err.kind(), FailureKind::Model);
}

#[tokio::test]
async fn test_no_choices_is_malformed() {
    let client = fixed_status(StatusCode::OK, r#"{"choices":[]}"#).await;
    let err = client
        .complete(&adf_solver::ChatRequest::new(0.4))
        .await
        .unwrap_err();

    assert!(matches!(err, SolveError::MalformedResponse(_)));
}

/// Sends response headers and the start of a body, then goes quiet.
async fn stalled_body_endpoint() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 64 * 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"choices\":[",
            )
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_body_timeout_is_transient() {
    let endpoint = stalled_body_endpoint().await;
    let client =
        AzureOpenAiClient::new(AzureOpenAiConfig::new(endpoint, "test-key").with_timeout(1)).unwrap();

    let err = client
        .complete(&adf_solver::ChatRequest::new(0.4))
        .await
        .unwrap_err();

    assert!(matches!(err, SolveError::Timeout(1)), "got {:?}", err);
    assert_eq!(err.kind(), FailureKind::Transient);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_error_omits_url() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    let err = client
        .complete(&adf_solver::ChatRequest::new(0.4))
        .await
        .unwrap_err();

    assert!(matches!(err, SolveError::Network(_)));
    let message = err.to_string();
    assert!(!message.contains("api-version"), "{}", message);
    assert!(!message.contains("/openai/deployments"), "{}", message);
}
