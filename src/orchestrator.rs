use std::sync::Arc;

use tracing::info;

use crate::bridge::run_blocking;
use crate::error::{Error, Result};
use crate::llm::{EntityExtractor, ExtractedEntity};
use crate::storage::{ChatMessage, ChatStore, ConversationRecord};

/// Synchronous facade over extraction and persistence for callers that do
/// not own a runtime (the legacy conversation-save path).
///
/// Every async operation is driven through [`run_blocking`], so the result
/// comes back synchronously whether or not the calling thread already sits
/// inside a tokio runtime.
pub struct ConversationOrchestrator {
    extractor: Arc<EntityExtractor>,
    store: Arc<dyn ChatStore>,
}

impl ConversationOrchestrator {
    pub fn new(extractor: Arc<EntityExtractor>, store: Arc<dyn ChatStore>) -> Self {
        Self { extractor, store }
    }

    /// Run entity extraction to completion and return the result
    /// synchronously. Same implementation and fallback behavior as the
    /// async endpoint path.
    pub fn extract(&self, chat_history: &[ChatMessage]) -> Result<ExtractedEntity> {
        let extractor = Arc::clone(&self.extractor);
        let history = chat_history.to_vec();
        run_blocking(async move { extractor.extract(&history).await })
    }

    /// Persist a conversation exactly once and return the created record.
    pub fn persist(
        &self,
        name: &str,
        company_name: &str,
        chat_history: &[ChatMessage],
    ) -> Result<ConversationRecord> {
        if chat_history.is_empty() {
            return Err(Error::Validation("chat history is empty".to_string()));
        }

        info!(
            "Persisting conversation for {} from {} with {} messages",
            name,
            company_name,
            chat_history.len()
        );

        let store = Arc::clone(&self.store);
        let name = name.to_string();
        let company_name = company_name.to_string();
        let history = chat_history.to_vec();

        run_blocking(async move { store.save(&name, &company_name, &history).await })
    }
}
