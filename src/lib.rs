pub mod bridge;
pub mod config;
pub mod error;
pub mod http;
pub mod livekit;
pub mod llm;
pub mod orchestrator;
pub mod storage;

pub use bridge::run_blocking;
pub use config::Config;
pub use error::{Error, Result};
pub use http::{create_router, AppState};
pub use livekit::{AccessGrant, LiveKitRegistry, RoomNameAllocator, RoomRegistry, TokenIssuer};
pub use llm::{CompletionClient, EntityExtractor, ExtractedEntity, OpenAiClient};
pub use orchestrator::ConversationOrchestrator;
pub use storage::{
    ChatHistoryGateway, ChatMessage, ChatQuery, ChatStore, ConversationRecord, Speaker,
    SupabaseStore,
};
