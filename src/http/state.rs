use std::sync::Arc;

use crate::config::Config;
use crate::livekit::{LiveKitRegistry, RoomNameAllocator, RoomRegistry, TokenIssuer};
use crate::llm::{EntityExtractor, OpenAiClient};
use crate::orchestrator::ConversationOrchestrator;
use crate::storage::{ChatHistoryGateway, ChatStore, SupabaseStore};

/// Shared application state for HTTP handlers.
///
/// All collaborator handles are injected (trait objects), so tests swap in
/// deterministic doubles via [`AppState::with_clients`].
#[derive(Clone)]
pub struct AppState {
    pub service_name: String,
    pub allocator: Arc<RoomNameAllocator>,
    pub issuer: TokenIssuer,
    pub extractor: Arc<EntityExtractor>,
    pub gateway: Arc<ChatHistoryGateway>,
    pub store: Arc<dyn ChatStore>,
    pub orchestrator: Arc<ConversationOrchestrator>,
}

impl AppState {
    /// Build state with real clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let issuer = TokenIssuer::new(
            config.livekit.api_key.clone(),
            config.livekit.api_secret.clone(),
            config.livekit.token_ttl_secs,
        );
        let registry: Arc<dyn RoomRegistry> =
            Arc::new(LiveKitRegistry::new(&config.livekit, issuer.clone()));
        let extractor = Arc::new(EntityExtractor::new(
            Arc::new(OpenAiClient::new(&config.llm)),
            config.llm.max_tokens,
            config.llm.temperature,
        ));
        let store: Arc<dyn ChatStore> = Arc::new(SupabaseStore::new(&config.storage));

        Self::with_clients(&config.service.name, registry, issuer, extractor, store)
    }

    /// Build state from explicit collaborator handles.
    pub fn with_clients(
        service_name: &str,
        registry: Arc<dyn RoomRegistry>,
        issuer: TokenIssuer,
        extractor: Arc<EntityExtractor>,
        store: Arc<dyn ChatStore>,
    ) -> Self {
        Self {
            service_name: service_name.to_string(),
            allocator: Arc::new(RoomNameAllocator::new(registry)),
            issuer,
            gateway: Arc::new(ChatHistoryGateway::new(Arc::clone(&store))),
            orchestrator: Arc::new(ConversationOrchestrator::new(
                Arc::clone(&extractor),
                Arc::clone(&store),
            )),
            extractor,
            store,
        }
    }
}
