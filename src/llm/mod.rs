//! LLM-backed structured extraction from conversation transcripts.

mod client;
mod extractor;

pub use client::{CompletionClient, OpenAiClient};
pub use extractor::{EntityExtractor, ExtractedEntity, UNKNOWN};
