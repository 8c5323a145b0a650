use async_trait::async_trait;
use tracing::info;

use super::records::{ChatMessage, ChatQuery, ConversationRecord};
use crate::config::StorageConfig;
use crate::error::{Error, Result};

/// Persistent chat store. `save` assigns the record id; `query` returns
/// records most-recent-first (the store owns that ordering guarantee).
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn save(
        &self,
        name: &str,
        company_name: &str,
        chat_history: &[ChatMessage],
    ) -> Result<ConversationRecord>;

    async fn query(&self, query: &ChatQuery) -> Result<Vec<ConversationRecord>>;
}

/// Chat store backed by a Supabase (PostgREST) table.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl ChatStore for SupabaseStore {
    async fn save(
        &self,
        name: &str,
        company_name: &str,
        chat_history: &[ChatMessage],
    ) -> Result<ConversationRecord> {
        let body = serde_json::json!({
            "name": name,
            "company_name": company_name,
            "chat_history": chat_history,
        });

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Service(format!("storage request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Service(format!(
                "storage insert failed ({status}): {detail}"
            )));
        }

        // PostgREST returns the created row(s) as an array.
        let mut rows: Vec<ConversationRecord> = response
            .json()
            .await
            .map_err(|e| Error::Service(format!("storage returned malformed record: {e}")))?;

        let record = rows
            .pop()
            .ok_or_else(|| Error::Service("storage returned no record".to_string()))?;

        info!("Saved conversation record {} for {}", record.id, name);
        Ok(record)
    }

    async fn query(&self, query: &ChatQuery) -> Result<Vec<ConversationRecord>> {
        let mut request = self
            .client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", query.limit.to_string()),
            ]);

        if let Some(name) = &query.name {
            request = request.query(&[("name", format!("eq.{name}"))]);
        }
        if let Some(company) = &query.company_name {
            request = request.query(&[("company_name", format!("eq.{company}"))]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Service(format!("storage request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Service(format!(
                "storage query failed ({status}): {detail}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Service(format!("storage returned malformed records: {e}")))
    }
}
