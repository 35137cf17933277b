use super::{
    Completion, CompletionOptions, CompletionProvider, Message, ProviderError, ProviderStream,
};
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::time::Instant;

/// Records `provider_requests_total` and `provider_request_duration_seconds`
/// around every call to the wrapped provider.
pub struct MeteredProvider<P> {
    inner: P,
}

impl<P: CompletionProvider> MeteredProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    #[cfg(test)]
    fn inner(&self) -> &P {
        &self.inner
    }

    fn record<T>(&self, operation: &'static str, start: Instant, result: &Result<T, ProviderError>) {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        let labels = [
            ("provider", self.inner.name()),
            ("operation", operation),
            ("outcome", outcome),
        ];

        counter!("provider_requests_total", &labels).increment(1);
        histogram!("provider_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        if let Err(e) = result {
            tracing::warn!(provider = self.inner.name(), operation, error = %e, "Provider call failed");
        }
    }
}

#[async_trait]
impl<P: CompletionProvider> CompletionProvider for MeteredProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Completion, ProviderError> {
        let start = Instant::now();
        let result = self.inner.complete(messages, options).await;
        self.record("complete", start, &result);
        result
    }

    /// Timing covers opening the stream, not its full duration.
    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<ProviderStream, ProviderError> {
        let start = Instant::now();
        let result = self.inner.complete_stream(messages, options).await;
        self.record("complete_stream", start, &result);
        result
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{MockBehavior, MockCompletionProvider};

    #[tokio::test]
    async fn delegates_to_inner_provider() {
        let provider = MeteredProvider::new(MockCompletionProvider::default());
        let completion = provider
            .complete(&[Message::user("ping")], &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.text.as_deref(), Some("Mock response: ping"));
        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn passes_errors_through() {
        let provider = MeteredProvider::new(MockCompletionProvider::new(MockBehavior::Fail));
        let result = provider
            .complete_stream(&[Message::user("ping")], &CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(ProviderError::ApiError(_))));
    }
}
