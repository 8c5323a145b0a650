use super::state::AppState;
use crate::error::Error;
use crate::livekit::AccessGrant;
use crate::storage::{ChatMessage, ChatQuery, ConversationRecord, DEFAULT_QUERY_LIMIT};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TokenParams {
    /// Participant identity (defaults to "my name")
    pub name: Option<String>,

    /// Room to join; allocated fresh when absent
    pub room: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveChatRequest {
    pub name: Option<String>,
    pub company_name: Option<String>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct SaveChatResponse {
    pub success: bool,
    pub message: String,
    pub record_id: String,
    pub message_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatQueryParams {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GetChatsResponse {
    pub success: bool,
    pub chats: Vec<ConversationRecord>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub name: String,
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct SaveConversationResponse {
    pub success: bool,
    pub name: String,
    pub company: String,
    pub message_count: usize,
    pub record_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::ServiceUnavailable(_) | Error::Service(_) | Error::Configuration(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Single catch-all error mapping used by every handler: no retries, no
/// partial success, one `{"error": ...}` body.
fn error_response(err: Error) -> Response {
    error!("request failed: {}", err);
    (
        error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /getToken
/// Issue a room-scoped access credential, allocating a room when none given
pub async fn get_token(
    State(state): State<AppState>,
    Query(params): Query<TokenParams>,
) -> impl IntoResponse {
    let name = params.name.unwrap_or_else(|| "my name".to_string());

    let room = match params.room {
        Some(room) => room,
        None => match state.allocator.allocate().await {
            Ok(room) => room,
            Err(e) => return error_response(e),
        },
    };

    info!("Issuing token for {} in room {}", name, room);

    let grant = AccessGrant {
        identity: name.clone(),
        room: room.clone(),
        room_join: true,
    };

    match state.issuer.issue(&name, &room, &grant) {
        Ok(token) => (StatusCode::OK, token).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /save_chat
/// Save a completed chat history
pub async fn save_chat(
    State(state): State<AppState>,
    Json(req): Json<SaveChatRequest>,
) -> impl IntoResponse {
    let name = req.name.unwrap_or_else(|| "Unknown".to_string());
    let company_name = req
        .company_name
        .unwrap_or_else(|| "Unknown Company".to_string());

    if req.chat_history.is_empty() {
        return error_response(Error::Validation("no chat history provided".to_string()));
    }

    info!(
        "Received request to save chat for {} from {} with {} messages",
        name,
        company_name,
        req.chat_history.len()
    );

    match state.store.save(&name, &company_name, &req.chat_history).await {
        Ok(record) => (
            StatusCode::OK,
            Json(SaveChatResponse {
                success: true,
                message: format!("Chat history saved successfully for {name}"),
                record_id: record.id,
                message_count: req.chat_history.len(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /get_chats
/// Retrieve persisted conversations, most recent first
pub async fn get_chats(
    State(state): State<AppState>,
    Query(params): Query<ChatQueryParams>,
) -> impl IntoResponse {
    let query = ChatQuery {
        name: params.name,
        company_name: params.company_name,
        limit: params.limit.unwrap_or(DEFAULT_QUERY_LIMIT),
    };

    match state.gateway.query(query).await {
        Ok(chats) => {
            info!("Retrieved {} chat records", chats.len());
            let count = chats.len();
            (
                StatusCode::OK,
                Json(GetChatsResponse {
                    success: true,
                    chats,
                    count,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST /extract_client_info
/// Extract client name and company from a transcript
pub async fn extract_client_info(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> impl IntoResponse {
    if req.chat_history.is_empty() {
        return error_response(Error::Validation("no chat history provided".to_string()));
    }

    match state.extractor.extract(&req.chat_history).await {
        Ok(entity) => (
            StatusCode::OK,
            Json(ExtractResponse {
                success: true,
                name: entity.name,
                company: entity.company,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /save-conversation
/// Legacy synchronous flow: extraction then persistence, driven through the
/// blocking bridge off the request runtime
pub async fn save_conversation(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> impl IntoResponse {
    if req.chat_history.is_empty() {
        return error_response(Error::Validation("chat history is empty".to_string()));
    }

    info!(
        "Processing conversation save - {} messages",
        req.chat_history.len()
    );

    let orchestrator = Arc::clone(&state.orchestrator);
    let history = req.chat_history;

    let result = tokio::task::spawn_blocking(move || {
        let entity = orchestrator.extract(&history)?;
        let record = orchestrator.persist(&entity.name, &entity.company, &history)?;
        Ok::<_, Error>((entity, record, history.len()))
    })
    .await;

    match result {
        Ok(Ok((entity, record, message_count))) => {
            info!(
                "Saved conversation - Name: {}, Company: {}, Messages: {}",
                entity.name, entity.company, message_count
            );
            (
                StatusCode::OK,
                Json(SaveConversationResponse {
                    success: true,
                    name: entity.name,
                    company: entity.company,
                    message_count,
                    record_id: record.id,
                }),
            )
                .into_response()
        }
        Ok(Err(e)) => error_response(e),
        Err(e) => error_response(Error::Service(format!("conversation task failed: {e}"))),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: state.service_name.clone(),
        }),
    )
}
