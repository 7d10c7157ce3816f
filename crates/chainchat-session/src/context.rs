use chainchat_common::{ContextEntry, ConversationId};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of context entries retained per conversation.
pub const MAX_CONTEXT_ENTRIES: usize = 10;

/// Bounded, ordered buffer of context entries for one conversation.
///
/// Entries are kept in insertion (chronological) order. When the buffer
/// grows past [`MAX_CONTEXT_ENTRIES`] the oldest entries are evicted first;
/// an entry is only ever appended or evicted, never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextWindow {
    entries: Vec<ContextEntry>,
}

impl ContextWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `new_entries` in order, then keep only the latest
    /// [`MAX_CONTEXT_ENTRIES`].
    pub fn extend(&mut self, new_entries: impl IntoIterator<Item = ContextEntry>) {
        self.entries.extend(new_entries);
        if self.entries.len() > MAX_CONTEXT_ENTRIES {
            let overflow = self.entries.len() - MAX_CONTEXT_ENTRIES;
            self.entries.drain(..overflow);
        }
    }
}

/// Keyed map from conversation id to its context window.
///
/// Handlers for different conversations may run concurrently, so the map is
/// a `DashMap`; a single conversation is always processed sequentially by
/// its front end. Windows live for the process lifetime and are never
/// evicted from the outer map.
#[derive(Debug, Default)]
pub struct ContextStore {
    windows: DashMap<ConversationId, ContextWindow>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current window for `conversation`, creating an empty one for an
    /// unseen id.
    pub fn get(&self, conversation: &ConversationId) -> ContextWindow {
        self.windows.entry(conversation.clone()).or_default().clone()
    }

    /// Append `new_entries` to the conversation's window, evicting the
    /// oldest entries past the bound. Returns the updated window, which is
    /// what the next [`ContextStore::get`] will observe.
    pub fn update(
        &self,
        conversation: &ConversationId,
        new_entries: Vec<ContextEntry>,
    ) -> ContextWindow {
        let mut window = self.windows.entry(conversation.clone()).or_default();
        window.extend(new_entries);
        debug!(
            "context window for {} now holds {} entries",
            conversation,
            window.len()
        );
        window.clone()
    }
}
