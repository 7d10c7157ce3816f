use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unit of conversational state returned by the agent service.
///
/// Entries are passed back verbatim on the next request; nothing in this
/// system interprets or mutates their contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextEntry(pub serde_json::Value);

impl ContextEntry {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for ContextEntry {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Identifies one conversation and its context window.
///
/// The terminal chat uses a single fixed id for the process lifetime; the
/// Telegram bot keys by user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ConversationId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
