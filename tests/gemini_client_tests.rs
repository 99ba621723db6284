use advice_gateway::services::gemini::{GeminiClient, GeminiConfig};
use advice_gateway::services::provider::{ConversationProvider, ProviderError};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Seen = Arc<Mutex<Vec<Value>>>;

/// Stands in for the Gemini endpoint: records request bodies and answers
/// with `reply`, or with `status` when it is not 200.
async fn fake_gemini(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen: Seen = Arc::default();

    let handler = {
        let reply = reply.clone();
        move |State(seen): State<Seen>, Json(body): Json<Value>| {
            let reply = reply.clone();
            async move {
                seen.lock().unwrap().push(body);
                (status, Json(reply)).into_response()
            }
        }
    };

    let app = Router::new().fallback(handler).with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/models"), seen)
}

fn client(base_url: String) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
        api_key: "test-key".to_string(),
        model: "gemini-2.0-flash".to_string(),
        base_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn candidate(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let (base_url, seen) = fake_gemini(StatusCode::OK, candidate("API is working")).await;
    let gemini = client(base_url);

    let text = gemini.generate("ping").await.unwrap();
    assert_eq!(text, "API is working");

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["contents"][0]["parts"][0]["text"], "ping");
    assert_eq!(requests[0]["generationConfig"]["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(7.0));
}

#[tokio::test]
async fn test_conversation_replays_history() {
    let (base_url, seen) = fake_gemini(StatusCode::OK, candidate("Open a Jan Dhan account.")).await;
    let gemini = client(base_url);

    let handle = gemini.start().await.unwrap();
    let (_, handle) = gemini.send(handle, "first question").await.unwrap();
    let (reply, handle) = gemini.send(handle, "second question").await.unwrap();

    assert_eq!(reply, "Open a Jan Dhan account.");
    assert_eq!(handle.history().len(), 4);

    let requests = seen.lock().unwrap();
    let contents = requests[1]["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "second question");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (base_url, _) =
        fake_gemini(StatusCode::FORBIDDEN, json!({ "error": { "message": "bad key" } })).await;
    let err = client(base_url).generate("hi").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_missing_candidates_is_empty_response() {
    let (base_url, _) = fake_gemini(StatusCode::OK, json!({ "candidates": [] })).await;
    let err = client(base_url).generate("hi").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let err = client("http://127.0.0.1:9/models".to_string())
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Http(_)));
    assert!(!err.to_string().contains("test-key"));
}
