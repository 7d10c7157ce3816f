pub mod context;

pub use context::{ContextStore, ContextWindow, MAX_CONTEXT_ENTRIES};
