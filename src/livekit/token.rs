use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Permission set embedded in an issued credential. Consumed once by the
/// issuer; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    pub identity: String,
    pub room: String,
    pub room_join: bool,
}

/// LiveKit-shaped video grant claim.
#[derive(Debug, Serialize, Deserialize)]
struct VideoGrant {
    #[serde(rename = "roomJoin", skip_serializing_if = "Option::is_none")]
    room_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    room: Option<String>,
    #[serde(rename = "roomList", skip_serializing_if = "Option::is_none")]
    room_list: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    name: String,
    nbf: i64,
    exp: i64,
    video: VideoGrant,
}

/// Builds signed, scoped access credentials for the media service.
///
/// Validity window and algorithm (HS256) follow the LiveKit token contract;
/// no expiry logic beyond the configured TTL is added here.
#[derive(Clone)]
pub struct TokenIssuer {
    api_key: String,
    api_secret: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ttl_secs,
        }
    }

    /// Issue a participant credential for joining `room`.
    pub fn issue(&self, identity: &str, room: &str, grant: &AccessGrant) -> Result<String> {
        self.sign(
            identity,
            VideoGrant {
                room_join: Some(grant.room_join),
                room: Some(room.to_string()),
                room_list: None,
            },
        )
    }

    /// Issue a server-side credential scoped to listing rooms, used by the
    /// registry client.
    pub fn issue_admin(&self) -> Result<String> {
        self.sign(
            "tekisho-server",
            VideoGrant {
                room_join: None,
                room: None,
                room_list: Some(true),
            },
        )
    }

    fn sign(&self, identity: &str, video: VideoGrant) -> Result<String> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return Err(Error::Configuration(
                "livekit api key and secret must be configured".to_string(),
            ));
        }

        let now = Utc::now();
        let claims = Claims {
            iss: self.api_key.clone(),
            sub: identity.to_string(),
            name: identity.to_string(),
            nbf: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            video,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )
        .map_err(|e| Error::Configuration(format!("token signing failed: {e}")))
    }
}
