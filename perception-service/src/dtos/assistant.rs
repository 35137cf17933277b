use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::providers::{Message, Role, Usage};
use crate::services::read_aloud::{WordTiming, DEFAULT_WORDS_PER_MINUTE};

fn default_true() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: String,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Prior turn supplied by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    pub role: HistoryRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl From<&HistoryMessage> for Message {
    fn from(turn: &HistoryMessage) -> Self {
        let role = match turn.role {
            HistoryRole::User => Role::User,
            HistoryRole::Assistant => Role::Assistant,
        };
        Message::new(role, turn.content.clone())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatGptRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    #[serde(default)]
    pub conversation_history: Vec<HistoryMessage>,

    pub system_prompt: Option<String>,

    #[serde(default = "default_temperature")]
    #[validate(range(min = 0.0, max = 2.0, message = "Temperature must be between 0 and 2"))]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    #[validate(range(min = 1, max = 4000, message = "Max tokens must be between 1 and 4000"))]
    pub max_tokens: u32,

    #[serde(default)]
    pub stream: bool,
}

impl ChatGptRequest {
    /// System prompt, prior turns and the new user turn, in order.
    pub fn messages(&self) -> Vec<Message> {
        self.system_prompt
            .iter()
            .map(Message::system)
            .chain(self.conversation_history.iter().map(Message::from))
            .chain(std::iter::once(Message::user(self.message.clone())))
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatGptResponse {
    pub message: String,
    pub usage: Option<Usage>,
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Elementary,
    #[default]
    Middle,
    High,
}

impl ReadingLevel {
    pub fn grade_band(self) -> &'static str {
        match self {
            ReadingLevel::Elementary => "3rd-5th grade",
            ReadingLevel::Middle => "6th-8th grade",
            ReadingLevel::High => "9th-12th grade",
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,

    #[serde(default)]
    pub reading_level: ReadingLevel,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyResponse {
    pub original: String,
    pub simplified: String,
    pub reading_level: ReadingLevel,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AltTextRequest {
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,

    #[serde(default = "default_true")]
    pub use_cache: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltTextResponse {
    pub alt_text: String,
    pub cached: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadAloudRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,

    #[serde(default = "default_words_per_minute")]
    #[validate(range(min = 50, max = 300, message = "Words per minute must be between 50 and 300"))]
    pub words_per_minute: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadAloudResponse {
    pub text: String,
    pub word_timings: Vec<WordTiming>,
    pub total_duration: f64,
    pub words_per_minute: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chatgpt_request_applies_defaults() {
        let req: ChatGptRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 1000);
        assert!(!req.stream);
        assert!(req.conversation_history.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn chatgpt_request_orders_messages() {
        let req: ChatGptRequest = serde_json::from_value(json!({
            "message": "third",
            "systemPrompt": "rules",
            "conversationHistory": [
                { "role": "user", "content": "first" },
                { "role": "assistant", "content": "second" }
            ]
        }))
        .unwrap();

        let roles: Vec<Role> = req.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(req.messages().last().unwrap().content.text(), "third");
    }

    #[test]
    fn chatgpt_request_rejects_out_of_range_sampling() {
        let req: ChatGptRequest =
            serde_json::from_value(json!({ "message": "hi", "temperature": 2.5 })).unwrap();
        assert!(req.validate().is_err());

        let req: ChatGptRequest =
            serde_json::from_value(json!({ "message": "hi", "maxTokens": 0 })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn history_rejects_system_role() {
        let result = serde_json::from_value::<ChatGptRequest>(json!({
            "message": "hi",
            "conversationHistory": [{ "role": "system", "content": "x" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn reading_level_defaults_to_middle() {
        let req: SimplifyRequest = serde_json::from_value(json!({ "text": "hello" })).unwrap();
        assert_eq!(req.reading_level, ReadingLevel::Middle);
        assert_eq!(ReadingLevel::Elementary.grade_band(), "3rd-5th grade");
        assert_eq!(ReadingLevel::High.grade_band(), "9th-12th grade");
    }

    #[test]
    fn alt_text_request_requires_url_and_caches_by_default() {
        let req: AltTextRequest =
            serde_json::from_value(json!({ "imageUrl": "https://example.com/a.png" })).unwrap();
        assert!(req.use_cache);
        assert!(req.validate().is_ok());

        let bad: AltTextRequest =
            serde_json::from_value(json!({ "imageUrl": "not a url" })).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn read_aloud_rate_is_bounded() {
        let req: ReadAloudRequest = serde_json::from_value(json!({ "text": "a b" })).unwrap();
        assert_eq!(req.words_per_minute, 150);

        let slow: ReadAloudRequest =
            serde_json::from_value(json!({ "text": "a", "wordsPerMinute": 49 })).unwrap();
        assert!(slow.validate().is_err());

        let fractional =
            serde_json::from_value::<ReadAloudRequest>(json!({ "text": "a", "wordsPerMinute": 150.5 }));
        assert!(fractional.is_err());
    }
}
