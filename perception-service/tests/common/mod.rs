#![allow(dead_code)]

use perception_service::config::{PerceptionConfig, ProviderConfig};
use perception_service::services::providers::{MockBehavior, MockCompletionProvider};
use perception_service::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const TEST_USER_ID: &str = "test_user_123";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub provider: Arc<MockCompletionProvider>,
}

pub fn test_config() -> PerceptionConfig {
    PerceptionConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        provider: ProviderConfig {
            backend: "mock".to_string(),
            api_key: String::new(),
            base_url: "http://127.0.0.1:1/v1".to_string(),
            chat_model: "mock-chat".to_string(),
            vision_model: "mock-vision".to_string(),
            timeout_secs: 5,
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockBehavior::Echo).await
    }

    pub async fn spawn_with(behavior: MockBehavior) -> Self {
        let provider = Arc::new(MockCompletionProvider::new(behavior));

        let app = Application::build_with_provider(test_config(), provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            provider,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
