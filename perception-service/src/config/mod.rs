use service_core::config::{self as core_config, get_env, is_prod};
use service_core::error::AppError;
use std::time::Duration;

use crate::services::providers::{OpenAiConfig, ProviderBackend};

const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct PerceptionConfig {
    pub common: core_config::Config,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// `openai` or `mock`
    pub backend: String,
    pub api_key: String,
    pub base_url: String,
    /// Model for chat, chatgpt and simplify (e.g., gpt-4)
    pub chat_model: String,
    /// Model for alt-text generation (e.g., gpt-4o)
    pub vision_model: String,
    pub timeout_secs: u64,
}

impl PerceptionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_prod();

        let backend = get_env("PROVIDER_BACKEND", Some("openai"), is_prod)?;
        let needs_key = backend.parse::<ProviderBackend>() == Ok(ProviderBackend::OpenAi);

        Ok(PerceptionConfig {
            common,
            provider: ProviderConfig {
                api_key: if needs_key {
                    get_env("OPENAI_API_KEY", None, is_prod)?
                } else {
                    String::new()
                },
                backend,
                base_url: get_env(
                    "OPENAI_BASE_URL",
                    Some("https://api.openai.com/v1"),
                    is_prod,
                )?,
                chat_model: get_env("PERCEPTION_CHAT_MODEL", Some("gpt-4"), is_prod)?,
                vision_model: get_env("PERCEPTION_VISION_MODEL", Some("gpt-4o"), is_prod)?,
                timeout_secs: parse_timeout_secs(
                    &get_env(
                        "PROVIDER_TIMEOUT_SECS",
                        Some(&DEFAULT_PROVIDER_TIMEOUT_SECS.to_string()),
                        is_prod,
                    )?,
                    is_prod,
                )?,
            },
        })
    }
}

/// A malformed timeout is fatal in production and falls back to the default
/// elsewhere.
fn parse_timeout_secs(raw: &str, is_prod: bool) -> Result<u64, AppError> {
    match raw.trim().parse() {
        Ok(secs) => Ok(secs),
        Err(e) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "PROVIDER_TIMEOUT_SECS must be a whole number of seconds, got '{}': {}",
            raw,
            e
        ))),
        Err(_) => {
            tracing::warn!(
                value = raw,
                default = DEFAULT_PROVIDER_TIMEOUT_SECS,
                "Ignoring malformed PROVIDER_TIMEOUT_SECS"
            );
            Ok(DEFAULT_PROVIDER_TIMEOUT_SECS)
        }
    }
}

impl ProviderConfig {
    pub fn backend(&self) -> Result<ProviderBackend, AppError> {
        self.backend
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))
    }

    pub fn openai(&self) -> OpenAiConfig {
        OpenAiConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            chat_model: self.chat_model.clone(),
            vision_model: self.vision_model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(backend: &str) -> ProviderConfig {
        ProviderConfig {
            backend: backend.to_string(),
            api_key: "sk-test".to_string(),
            base_url: "http://localhost:9999/v1".to_string(),
            chat_model: "gpt-4".to_string(),
            vision_model: "gpt-4o".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn parses_backend() {
        assert_eq!(provider("mock").backend().unwrap(), ProviderBackend::Mock);
        assert!(matches!(
            provider("bedrock").backend(),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn malformed_timeout_is_fatal_in_prod() {
        assert_eq!(parse_timeout_secs("45", true).unwrap(), 45);
        assert!(matches!(
            parse_timeout_secs("2m", true),
            Err(AppError::ConfigError(_))
        ));
        assert_eq!(
            parse_timeout_secs("2m", false).unwrap(),
            DEFAULT_PROVIDER_TIMEOUT_SECS
        );
    }

    #[test]
    fn builds_openai_client_config() {
        let openai = provider("openai").openai();
        assert_eq!(openai.timeout, Duration::from_secs(30));
        assert_eq!(openai.vision_model, "gpt-4o");
    }
}
