//! Domain models for the Perception service.

pub mod alt_text;
pub mod conversation;
pub mod preferences;

pub use alt_text::AltTextCacheEntry;
pub use conversation::{ChatConversation, ChatMessage, ChatRole};
pub use preferences::{
    ContrastLevel, UserPreferences, UserPreferencesUpdate, DEFAULT_FONT_SIZE_PERCENT,
};
