pub mod claude;
pub mod rinna;
pub mod sagemaker;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::AnswerError;
use claude::{AnthropicClient, ClaudeBackend};
use rinna::RinnaBackend;
use sagemaker::SageMakerClient;
pub use types::{AnswerRequest, RetrievedDocument};

/// One text-generation backend: renders its own prompt from the request and
/// invokes its own transport. Selected once at startup.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// selector value this backend answers to (e.g. "rinna", "claude")
    fn name(&self) -> &str;

    async fn answer(&self, request: &AnswerRequest) -> Result<String, AnswerError>;
}

/// Startup-selected answer generator. Construction fails for selector values
/// outside the closed set; generation errors propagate untouched.
pub struct AnswerService {
    backend: Box<dyn AnswerBackend>,
}

impl std::fmt::Debug for AnswerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerService")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl AnswerService {
    pub fn new(backend: Box<dyn AnswerBackend>) -> Self {
        Self { backend }
    }

    /// Build the backend named by `config.backend`. `endpoint_name` and
    /// `region` only matter for the self-hosted path.
    pub async fn from_config(
        config: &AppConfig,
        endpoint_name: &str,
        region: &str,
    ) -> Result<Self, AnswerError> {
        match config.backend.as_str() {
            "rinna" => {
                let client = Arc::new(SageMakerClient::from_region(region).await);
                Ok(Self::new(Box::new(RinnaBackend::new(
                    endpoint_name.to_string(),
                    client,
                ))))
            }
            "claude" => {
                let api_key = config.anthropic_api_key.clone().ok_or_else(|| {
                    AnswerError::Config(
                        "ANTHROPIC_API_KEY is required for the claude backend".to_string(),
                    )
                })?;
                let client = Arc::new(AnthropicClient::new(api_key));
                Ok(Self::new(Box::new(ClaudeBackend::new(client))))
            }
            other => Err(AnswerError::UnsupportedBackend(other.to_string())),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn generate(&self, request: &AnswerRequest) -> Result<String, AnswerError> {
        self.backend.answer(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: &str, api_key: Option<&str>) -> AppConfig {
        AppConfig {
            backend: backend.to_string(),
            anthropic_api_key: api_key.map(|k| k.to_string()),
        }
    }

    #[tokio::test]
    async fn unknown_selector_is_rejected_before_any_client_exists() {
        let err = AnswerService::from_config(&config("palm2", None), "ep", "us-west-2")
            .await
            .unwrap_err();
        match err {
            AnswerError::UnsupportedBackend(name) => assert_eq!(name, "palm2"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn claude_without_api_key_is_a_config_error() {
        let err = AnswerService::from_config(&config("claude", None), "ep", "us-west-2")
            .await
            .unwrap_err();
        assert!(matches!(err, AnswerError::Config(_)));
    }

    #[tokio::test]
    async fn claude_with_api_key_initializes() {
        let service = AnswerService::from_config(&config("claude", Some("sk-test")), "ep", "us-west-2")
            .await
            .unwrap();
        assert_eq!(service.backend_name(), "claude");
    }
}
