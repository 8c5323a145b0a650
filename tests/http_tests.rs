// End-to-end router tests with deterministic collaborator doubles injected
// through AppState.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use tekisho_chat::{
    create_router, AppState, ChatMessage, ChatQuery, ChatStore, CompletionClient,
    ConversationRecord, EntityExtractor, Error, RoomRegistry, TokenIssuer,
};

// ============================================================================
// Doubles
// ============================================================================

struct EmptyRegistry;

#[async_trait]
impl RoomRegistry for EmptyRegistry {
    async fn list_active_rooms(&self) -> tekisho_chat::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

struct FixedCompletion(&'static str);

#[async_trait]
impl CompletionClient for FixedCompletion {
    async fn complete(
        &self,
        _prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> tekisho_chat::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Echoes the save back as a created record with a fixed id.
struct MemoryStore;

#[async_trait]
impl ChatStore for MemoryStore {
    async fn save(
        &self,
        name: &str,
        company_name: &str,
        chat_history: &[ChatMessage],
    ) -> tekisho_chat::Result<ConversationRecord> {
        Ok(ConversationRecord {
            id: "rec-1".to_string(),
            name: name.to_string(),
            company_name: company_name.to_string(),
            chat_history: chat_history.to_vec(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        })
    }

    async fn query(&self, query: &ChatQuery) -> tekisho_chat::Result<Vec<ConversationRecord>> {
        let record = ConversationRecord {
            id: "rec-1".to_string(),
            name: query.name.clone().unwrap_or_else(|| "Alice".to_string()),
            company_name: "Acme".to_string(),
            chat_history: Vec::new(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        Ok(vec![record])
    }
}

struct FailingStore;

#[async_trait]
impl ChatStore for FailingStore {
    async fn save(
        &self,
        _name: &str,
        _company_name: &str,
        _chat_history: &[ChatMessage],
    ) -> tekisho_chat::Result<ConversationRecord> {
        Err(Error::Service("storage insert failed (503)".to_string()))
    }

    async fn query(&self, _query: &ChatQuery) -> tekisho_chat::Result<Vec<ConversationRecord>> {
        Err(Error::Service("storage query failed (503)".to_string()))
    }
}

fn test_state(store: Arc<dyn ChatStore>) -> AppState {
    let extractor = Arc::new(EntityExtractor::new(
        Arc::new(FixedCompletion(r#"{"name": "Alice", "company": "Acme"}"#)),
        100,
        0.1,
    ));
    AppState::with_clients(
        "Tekisho Chat API",
        Arc::new(EmptyRegistry),
        TokenIssuer::new("api-key", "api-secret", 3600),
        extractor,
        store,
    )
}

fn chat_history() -> Value {
    json!([
        {"timestamp": "2024-01-01T12:00:00", "speaker": "Agent", "message": "Hello!", "type": "text"},
        {"timestamp": "2024-01-01T12:00:05", "speaker": "User", "message": "My name is Alice, I work at Acme", "type": "text"},
        {"timestamp": "2024-01-01T12:00:10", "speaker": "Agent", "message": "Nice to meet you, Alice", "type": "text"},
    ])
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn health_reports_service_name() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Tekisho Chat API");
}

#[tokio::test]
async fn get_token_returns_a_signed_credential() {
    let request = Request::builder()
        .uri("/getToken?name=alice")
        .body(Body::empty())
        .unwrap();

    let response = create_router(test_state(Arc::new(MemoryStore)))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let token = String::from_utf8(bytes.to_vec()).unwrap();
    // Compact JWT: three dot-separated segments.
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn get_token_accepts_an_explicit_room() {
    let request = Request::builder()
        .uri("/getToken?name=alice&room=room-cafef00d")
        .body(Body::empty())
        .unwrap();

    let response = create_router(test_state(Arc::new(MemoryStore)))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn save_chat_reports_message_count() {
    let history = chat_history();
    let message_count = history.as_array().unwrap().len();
    let request = post_json(
        "/save_chat",
        json!({"name": "Alice", "company_name": "Acme", "chat_history": history}),
    );

    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["record_id"], "rec-1");
    assert_eq!(body["message_count"], message_count);
    assert_eq!(
        body["message"],
        "Chat history saved successfully for Alice"
    );
}

#[tokio::test]
async fn save_chat_defaults_missing_names() {
    let request = post_json("/save_chat", json!({"chat_history": chat_history()}));
    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Chat history saved successfully for Unknown");
}

#[tokio::test]
async fn save_chat_rejects_empty_history() {
    let request = post_json(
        "/save_chat",
        json!({"name": "Alice", "company_name": "Acme", "chat_history": []}),
    );
    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("chat history"));
}

#[tokio::test]
async fn save_chat_storage_failure_is_500_with_error_body() {
    let request = post_json(
        "/save_chat",
        json!({"name": "Alice", "company_name": "Acme", "chat_history": chat_history()}),
    );
    let (status, body) = send(test_state(Arc::new(FailingStore)), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("storage"));
}

#[tokio::test]
async fn get_chats_returns_records_and_count() {
    let request = Request::builder()
        .uri("/get_chats?name=Alice&limit=10")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["chats"][0]["name"], "Alice");
}

#[tokio::test]
async fn get_chats_rejects_non_positive_limit() {
    // The one limit policy everywhere: reject, never clamp.
    for uri in ["/get_chats?limit=0", "/get_chats?limit=-3"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("positive"));
    }
}

#[tokio::test]
async fn extract_client_info_returns_extracted_entity() {
    let request = post_json("/extract_client_info", json!({"chat_history": chat_history()}));
    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["company"], "Acme");
}

#[tokio::test]
async fn extract_client_info_rejects_missing_history() {
    let request = post_json("/extract_client_info", json!({"chat_history": []}));
    let (status, _body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_conversation_runs_the_legacy_flow_end_to_end() {
    let history = chat_history();
    let message_count = history.as_array().unwrap().len();
    let request = post_json("/save-conversation", json!({"chat_history": history}));

    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["message_count"], message_count);
    assert_eq!(body["record_id"], "rec-1");
}

#[tokio::test]
async fn save_conversation_rejects_empty_history() {
    let request = post_json("/save-conversation", json!({"chat_history": []}));
    let (status, body) = send(test_state(Arc::new(MemoryStore)), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn save_conversation_storage_failure_is_500() {
    let request = post_json("/save-conversation", json!({"chat_history": chat_history()}));
    let (status, body) = send(test_state(Arc::new(FailingStore)), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("storage"));
}
