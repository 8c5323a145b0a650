//! Persistence of completed chat sessions.
//!
//! `records` holds the wire/data model, `client` the store trait and the
//! Supabase-backed implementation, `gateway` the validated read path.

mod client;
mod gateway;
mod records;

pub use client::{ChatStore, SupabaseStore};
pub use gateway::ChatHistoryGateway;
pub use records::{ChatMessage, ChatQuery, ConversationRecord, Speaker, DEFAULT_QUERY_LIMIT};
