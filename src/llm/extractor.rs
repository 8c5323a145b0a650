use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::client::CompletionClient;
use crate::error::Result;
use crate::storage::ChatMessage;

pub const UNKNOWN: &str = "Unknown";

/// Client identity derived from a transcript. Fields are always present;
/// anything the model could not determine is the literal `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub name: String,
    pub company: String,
}

impl ExtractedEntity {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            company: UNKNOWN.to_string(),
        }
    }
}

/// Derives `{name, company}` from a chat transcript via one completion call.
///
/// This is the single extraction implementation for every call path; the
/// async endpoints use it directly and the legacy synchronous path reaches it
/// through the orchestrator. Parse failures never surface as errors.
pub struct EntityExtractor {
    client: Arc<dyn CompletionClient>,
    max_tokens: u32,
    temperature: f32,
}

impl EntityExtractor {
    pub fn new(client: Arc<dyn CompletionClient>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            max_tokens,
            temperature,
        }
    }

    /// One bounded, low-temperature completion request, then a strict parse.
    /// Malformed or non-JSON responses fall back to `Unknown`/`Unknown`;
    /// completion-service failures propagate.
    pub async fn extract(&self, transcript: &[ChatMessage]) -> Result<ExtractedEntity> {
        let prompt = build_prompt(&render_transcript(transcript));

        let response = self
            .client
            .complete(&prompt, self.max_tokens, self.temperature)
            .await?;

        let entity = parse_entity(&response);
        info!("Extracted client info: {} from {}", entity.name, entity.company);
        Ok(entity)
    }
}

fn render_transcript(messages: &[ChatMessage]) -> String {
    let mut text = String::new();
    for msg in messages {
        let _ = writeln!(text, "{}: {}", msg.speaker.as_str(), msg.message);
    }
    text
}

fn build_prompt(conversation: &str) -> String {
    format!(
        "Analyze the following conversation and extract the client's name and company name.\n\
         Return ONLY a JSON object with 'name' and 'company' fields.\n\
         If information is not found, use 'Unknown' for that field.\n\
         \n\
         Conversation:\n\
         {conversation}\n\
         Example response format:\n\
         {{\"name\": \"John Doe\", \"company\": \"Acme Corp\"}}"
    )
}

fn parse_entity(raw: &str) -> ExtractedEntity {
    match serde_json::from_str::<ExtractedEntity>(raw.trim()) {
        Ok(entity) => entity,
        Err(e) => {
            warn!("extraction response was not the expected JSON ({e}), using fallback");
            ExtractedEntity::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_prompt, parse_entity, render_transcript, ExtractedEntity};
    use crate::storage::{ChatMessage, Speaker};

    fn message(speaker: Speaker, text: &str) -> ChatMessage {
        ChatMessage {
            timestamp: "2024-01-01T12:00:00".to_string(),
            speaker,
            message: text.to_string(),
            message_type: "text".to_string(),
        }
    }

    #[test]
    fn renders_speaker_prefixed_lines() {
        let transcript = vec![
            message(Speaker::Agent, "Hello, who am I speaking with?"),
            message(Speaker::User, "This is Alice from Acme."),
        ];

        let text = render_transcript(&transcript);
        assert_eq!(
            text,
            "Agent: Hello, who am I speaking with?\nUser: This is Alice from Acme.\n"
        );
    }

    #[test]
    fn prompt_embeds_conversation_and_format_hint() {
        let prompt = build_prompt("User: hi\n");
        assert!(prompt.contains("User: hi"));
        assert!(prompt.contains("'name' and 'company'"));
        assert!(prompt.contains("John Doe"));
    }

    #[test]
    fn parses_strict_json() {
        let entity = parse_entity(r#" {"name": "Alice", "company": "Acme"} "#);
        assert_eq!(entity.name, "Alice");
        assert_eq!(entity.company, "Acme");
    }

    #[test]
    fn falls_back_on_prose() {
        assert_eq!(
            parse_entity("The client did not give a name."),
            ExtractedEntity::unknown()
        );
    }

    #[test]
    fn falls_back_on_missing_field() {
        assert_eq!(
            parse_entity(r#"{"name": "Alice"}"#),
            ExtractedEntity::unknown()
        );
    }
}
