pub mod font_size;
pub mod prompts;
pub mod providers;
pub mod read_aloud;
pub mod relay;
pub mod store;
pub mod suggestions;

pub use providers::{CompletionProvider, ProviderBackend};
pub use store::{
    AltTextStore, ConversationStore, InMemoryAltTextStore, InMemoryConversationStore,
    InMemoryPreferenceStore, PreferenceStore,
};
