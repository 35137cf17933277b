//! Deterministic provider for tests and offline development.

use super::{
    Completion, CompletionOptions, CompletionProvider, Message, ModelKind, ProviderError,
    ProviderStream, Role, StreamChunk, Usage,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the mock answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockBehavior {
    /// Reply with `Mock response: <last user text>`.
    #[default]
    Echo,
    /// Return no content.
    Empty,
    /// Fail every call.
    Fail,
    /// Stream the first word, then fail.
    FailMidStream,
}

#[derive(Default)]
pub struct MockCompletionProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockCompletionProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completion calls received, streaming included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn reply_for(messages: &[Message]) -> String {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.text())
            .unwrap_or_default();
        format!("Mock response: {}", prompt)
    }

    fn model_name(kind: ModelKind) -> &'static str {
        match kind {
            ModelKind::Chat => "mock-chat",
            ModelKind::Vision => "mock-vision",
        }
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let text = match self.behavior {
            MockBehavior::Fail => {
                return Err(ProviderError::ApiError("Mock provider failure".to_string()))
            }
            MockBehavior::Empty => None,
            MockBehavior::Echo | MockBehavior::FailMidStream => Some(Self::reply_for(messages)),
        };

        let prompt_tokens: u32 = messages
            .iter()
            .map(|m| m.content.text().split_whitespace().count() as u32)
            .sum();
        let completion_tokens = text
            .as_deref()
            .map(|t| t.split_whitespace().count() as u32)
            .unwrap_or(0);

        Ok(Completion {
            text,
            usage: Some(Usage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }),
            model: Self::model_name(options.model).to_string(),
        })
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<ProviderStream, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = Self::reply_for(messages);
        let mut chunks: Vec<Result<StreamChunk, ProviderError>> = match self.behavior {
            MockBehavior::Fail => {
                return Err(ProviderError::ApiError("Mock provider failure".to_string()))
            }
            MockBehavior::Empty => Vec::new(),
            MockBehavior::Echo => reply
                .split_inclusive(' ')
                .map(|word| Ok(StreamChunk::Text(word.to_string())))
                .collect(),
            MockBehavior::FailMidStream => vec![
                Ok(StreamChunk::Text("Mock ".to_string())),
                Err(ProviderError::NetworkError("Mock stream interrupted".to_string())),
            ],
        };

        if self.behavior != MockBehavior::FailMidStream {
            chunks.push(Ok(StreamChunk::Complete));
        }

        Ok(Box::pin(tokio_stream::iter(chunks)) as ProviderStream)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Fail => Err(ProviderError::NotConfigured(
                "Mock provider set to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
