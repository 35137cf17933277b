pub mod assistant;
pub mod conversations;
pub mod health;
pub mod preferences;

pub use assistant::{chat, chatgpt, generate_alt_text, read_aloud, simplify};
pub use conversations::{get_conversation, list_conversations};
pub use health::{health_check, metrics_endpoint};
pub use preferences::{adjust_font_size, get_font_size, get_preferences, update_preferences};
