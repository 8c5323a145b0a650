use std::sync::Arc;

use tracing::info;

use super::client::ChatStore;
use super::records::{ChatQuery, ConversationRecord};
use crate::error::{Error, Result};

/// Filtered, limited read access to persisted conversations.
pub struct ChatHistoryGateway {
    store: Arc<dyn ChatStore>,
}

impl ChatHistoryGateway {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// Non-positive limits are rejected, never clamped. Ordering
    /// (most-recent-first) is the store's contract; no re-sort here.
    pub async fn query(&self, query: ChatQuery) -> Result<Vec<ConversationRecord>> {
        if query.limit <= 0 {
            return Err(Error::Validation(format!(
                "limit must be a positive integer, got {}",
                query.limit
            )));
        }

        info!(
            "Retrieving chats with filters: name={:?}, company={:?}, limit={}",
            query.name, query.company_name, query.limit
        );

        self.store.query(&query).await
    }
}
