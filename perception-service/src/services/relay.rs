//! Relays a provider stream to a client as event frames.
//!
//! A spawned task pulls from the provider and pushes frames into a bounded
//! channel. When the consumer goes away the channel closes, the task exits
//! and the provider stream is dropped, which cancels the upstream request.

use crate::services::providers::{ProviderStream, StreamChunk};
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

const RELAY_BUFFER: usize = 16;

/// Message sent to the client when the provider fails mid-stream.
pub const STREAM_ERROR_MESSAGE: &str = "The response stream was interrupted";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFrame {
    pub content: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StreamFrame {
    fn delta(content: String) -> Self {
        Self {
            content,
            done: false,
            full_response: None,
            error: None,
        }
    }

    fn finished(full_response: String) -> Self {
        Self {
            content: String::new(),
            done: true,
            full_response: Some(full_response),
            error: None,
        }
    }

    fn failed(error: &str) -> Self {
        Self {
            content: String::new(),
            done: true,
            full_response: None,
            error: Some(error.to_string()),
        }
    }
}

/// Spawn the relay task and return the consumer side.
pub fn relay(mut upstream: ProviderStream) -> ReceiverStream<StreamFrame> {
    let (tx, rx) = mpsc::channel(RELAY_BUFFER);

    tokio::spawn(async move {
        let mut full_response = String::new();

        loop {
            let next = tokio::select! {
                _ = tx.closed() => {
                    tracing::debug!("Stream consumer disconnected, cancelling provider stream");
                    return;
                }
                next = upstream.next() => next,
            };

            let frame = match next {
                Some(Ok(StreamChunk::Text(text))) => {
                    if text.is_empty() {
                        continue;
                    }
                    full_response.push_str(&text);
                    StreamFrame::delta(text)
                }
                Some(Ok(StreamChunk::Complete)) | None => {
                    let _ = tx.send(StreamFrame::finished(full_response)).await;
                    return;
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Provider stream failed");
                    let _ = tx.send(StreamFrame::failed(STREAM_ERROR_MESSAGE)).await;
                    return;
                }
            };

            if tx.send(frame).await.is_err() {
                tracing::debug!("Stream consumer disconnected, cancelling provider stream");
                return;
            }
        }
    });

    ReceiverStream::new(rx)
}
