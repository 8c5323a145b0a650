//! HTTP API server for the chat frontend
//!
//! This module provides the REST surface of the service:
//! - GET /getToken - Issue a room-scoped access credential
//! - POST /save_chat - Persist a completed chat history
//! - GET /get_chats - Retrieve persisted conversations
//! - POST /extract_client_info - LLM entity extraction from a transcript
//! - POST /save-conversation - Legacy synchronous extract-and-save flow
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
