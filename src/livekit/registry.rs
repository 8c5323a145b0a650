use async_trait::async_trait;
use serde::Deserialize;

use super::token::TokenIssuer;
use crate::config::LiveKitConfig;
use crate::error::{Error, Result};

/// Live, externally-owned room registry. Each call is an independent,
/// idempotent snapshot.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    async fn list_active_rooms(&self) -> Result<Vec<String>>;
}

/// Registry client speaking the LiveKit Twirp room-service API.
pub struct LiveKitRegistry {
    client: reqwest::Client,
    url: String,
    issuer: TokenIssuer,
}

#[derive(Debug, Deserialize)]
struct ListRoomsResponse {
    #[serde(default)]
    rooms: Vec<RoomInfo>,
}

#[derive(Debug, Deserialize)]
struct RoomInfo {
    name: String,
}

impl LiveKitRegistry {
    pub fn new(config: &LiveKitConfig, issuer: TokenIssuer) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.trim_end_matches('/').to_string(),
            issuer,
        }
    }
}

#[async_trait]
impl RoomRegistry for LiveKitRegistry {
    async fn list_active_rooms(&self) -> Result<Vec<String>> {
        let token = self.issuer.issue_admin()?;

        let response = self
            .client
            .post(format!("{}/twirp/livekit.RoomService/ListRooms", self.url))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("room registry unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::ServiceUnavailable(format!(
                "room registry returned {status}: {detail}"
            )));
        }

        let payload: ListRoomsResponse = response
            .json()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("room registry response malformed: {e}")))?;

        Ok(payload.rooms.into_iter().map(|room| room.name).collect())
    }
}
