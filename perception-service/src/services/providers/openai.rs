//! OpenAI-compatible chat completions client.
//!
//! Talks to `POST {base_url}/chat/completions` with bearer auth. Streaming
//! responses are parsed as server-sent events and relayed through a channel.

use super::{
    Completion, CompletionOptions, CompletionProvider, Message, ModelKind, ProviderError,
    ProviderStream, StreamChunk, Usage,
};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub timeout: Duration,
}

pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        // Whole-request deadlines are set per call; streamed bodies have none.
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn model(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::Chat => &self.config.chat_model,
            ModelKind::Vision => &self.config.vision_model,
        }
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [Message],
        options: &CompletionOptions,
        stream: bool,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: self.model(options.model),
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream,
        }
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest<'_>,
        deadline: Option<Duration>,
    ) -> Result<Response, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "OpenAI API key not configured".to_string(),
            ));
        }

        let mut builder = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(request);
        if let Some(deadline) = deadline {
            builder = builder.timeout(deadline);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(ProviderError::ApiError(format!(
            "OpenAI API error {}: {}",
            status, error_text
        )))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Completion, ProviderError> {
        let request = self.build_request(messages, options, false);

        tracing::debug!(
            model = request.model,
            message_count = messages.len(),
            "Sending request to OpenAI API"
        );

        let response: ChatCompletionResponse = self
            .send(&request, Some(self.config.timeout))
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty());

        Ok(Completion {
            text,
            usage: response.usage,
            model: response.model,
        })
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<ProviderStream, ProviderError> {
        let request = self.build_request(messages, options, true);

        tracing::debug!(
            model = request.model,
            message_count = messages.len(),
            "Starting streaming request to OpenAI API"
        );

        let response = self.send(&request, None).await?;

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut body = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(Err(ProviderError::NetworkError(e.to_string()))).await;
                        return;
                    }
                };
                buffer.extend_from_slice(&bytes);

                for event in drain_events(&mut buffer) {
                    let item = match event {
                        SseEvent::Delta(text) => Ok(StreamChunk::Text(text)),
                        SseEvent::Done => Ok(StreamChunk::Complete),
                        SseEvent::Malformed(err) => Err(ProviderError::InvalidResponse(err)),
                    };
                    let finished = !matches!(item, Ok(StreamChunk::Text(_)));

                    // Receiver gone means the client went away; dropping `body`
                    // aborts the upstream request.
                    if tx.send(item).await.is_err() || finished {
                        return;
                    }
                }
            }

            let _ = tx.send(Ok(StreamChunk::Complete)).await;
        });

        Ok(Box::pin(ReceiverStream::new(rx)) as ProviderStream)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "OpenAI API key not configured".to_string(),
            ));
        }

        let response = self
            .client
            .get(self.url("models"))
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

#[derive(Debug, PartialEq)]
enum SseEvent {
    Delta(String),
    Done,
    Malformed(String),
}

/// Remove every complete event from `buffer`, leaving any partial event.
///
/// Events are decoded only once complete, so a multi-byte character split
/// across network chunks survives intact.
fn drain_events(buffer: &mut Vec<u8>) -> Vec<SseEvent> {
    let mut events = Vec::new();

    while let Some(end) = buffer.windows(2).position(|w| w == b"\n\n") {
        let raw: Vec<u8> = buffer.drain(..end + 2).collect();
        let raw = match std::str::from_utf8(&raw) {
            Ok(raw) => raw,
            Err(e) => {
                events.push(SseEvent::Malformed(format!(
                    "Stream event is not valid UTF-8: {}",
                    e
                )));
                continue;
            }
        };

        for line in raw.lines() {
            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();

            if data == "[DONE]" {
                events.push(SseEvent::Done);
                continue;
            }

            match serde_json::from_str::<ChatCompletionChunk>(data) {
                Ok(chunk) => {
                    let content = chunk
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.delta.content)
                        .unwrap_or_default();
                    if !content.is_empty() {
                        events.push(SseEvent::Delta(content));
                    }
                }
                Err(e) => events.push(SseEvent::Malformed(format!(
                    "Failed to parse stream chunk: {}",
                    e
                ))),
            }
        }
    }

    events
}

// API wire types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    content: Option<String>,
}
