use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session provisioning
        .route("/getToken", get(handlers::get_token))
        // Conversation persistence and retrieval
        .route("/save_chat", post(handlers::save_chat))
        .route("/get_chats", get(handlers::get_chats))
        // Entity extraction
        .route("/extract_client_info", post(handlers::extract_client_info))
        // Legacy synchronous save flow
        .route("/save-conversation", post(handlers::save_conversation))
        // Browser clients call from any origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
