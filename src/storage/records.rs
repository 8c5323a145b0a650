use serde::{Deserialize, Serialize};

/// Default page size for chat-history queries.
pub const DEFAULT_QUERY_LIMIT: i64 = 50;

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Agent,
    System,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Agent => "Agent",
            Speaker::System => "System",
        }
    }
}

/// One line of a conversation. Immutable once created.
///
/// `timestamp` and `type` are optional on the wire: the extraction endpoint
/// receives bare `{speaker, message}` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub timestamp: String,
    pub speaker: Speaker,
    pub message: String,
    #[serde(rename = "type", default = "default_message_type")]
    pub message_type: String,
}

fn default_message_type() -> String {
    "text".to_string()
}

/// A persisted chat session. Created exactly once per successful save;
/// `id` and `created_at` are assigned by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    pub name: String,
    pub company_name: String,
    pub chat_history: Vec<ChatMessage>,
    pub created_at: String,
}

/// Filters for reading back persisted conversations.
#[derive(Debug, Clone)]
pub struct ChatQuery {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub limit: i64,
}

impl Default for ChatQuery {
    fn default() -> Self {
        Self {
            name: None,
            company_name: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}
