// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Language model client

use crate::provider::Provider;
use crate::request::CompletionRequest;
use async_trait::async_trait;
use codeforge::{Error, Lm, LmOutput, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the LM client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmConfig {
    /// Model name
    pub model: String,

    /// Temperature
    pub temperature: f32,

    /// Max tokens
    pub max_tokens: u32,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            model: "codellama:7b".to_string(),
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

impl LmConfig {
    /// Create a config for the given model with default sampling settings
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Concrete [`Lm`] implementation backed by an HTTP provider
pub struct LmClient {
    config: LmConfig,
    provider: Box<dyn Provider>,
}

impl LmClient {
    /// Create a new LM client
    pub fn new(config: LmConfig, provider: Box<dyn Provider>) -> Self {
        Self { config, provider }
    }

    /// Create with default config
    pub fn with_provider(provider: Box<dyn Provider>) -> Self {
        Self::new(LmConfig::default(), provider)
    }

    /// Get configuration
    pub fn config(&self) -> &LmConfig {
        &self.config
    }
}

#[async_trait]
impl Lm for LmClient {
    async fn generate(&self, prompt: &str) -> Result<LmOutput> {
        let request = CompletionRequest::new(prompt);
        let response = self
            .provider
            .complete(request, &self.config)
            .await
            .map_err(|err| Error::lm(err.to_string()))?;

        let mut output = LmOutput::new(response.text);
        if let Some(usage) = response.usage {
            output = LmOutput::with_tokens(
                output.text,
                usage.prompt_tokens,
                usage.completion_tokens,
            );
        }
        Ok(output)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{CompletionResponse, Usage};
    use crate::ProviderKind;

    struct EchoProvider;

    #[async_trait]
    impl Provider for EchoProvider {
        async fn complete(
            &self,
            request: CompletionRequest<'_>,
            config: &LmConfig,
        ) -> anyhow::Result<CompletionResponse> {
            Ok(CompletionResponse::new(
                request.prompt.into_owned(),
                config.model.clone(),
            )
            .with_usage(Usage::new(7, 3)))
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::Ollama
        }
    }

    struct BrokenProvider;

    #[async_trait]
    impl Provider for BrokenProvider {
        async fn complete(
            &self,
            _request: CompletionRequest<'_>,
            _config: &LmConfig,
        ) -> anyhow::Result<CompletionResponse> {
            anyhow::bail!("connection refused")
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::Ollama
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = LmConfig::default();
        assert_eq!(config.model, "codellama:7b");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn test_config_for_model() {
        let config = LmConfig::for_model("llama3.2:3b").with_temperature(0.5);
        assert_eq!(config.model, "llama3.2:3b");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 1024);
    }

    #[tokio::test]
    async fn test_client_maps_response_to_lm_output() {
        let client = LmClient::with_provider(Box::new(EchoProvider));

        let output = client.generate("hello").await.unwrap();
        assert_eq!(output.text, "hello");
        assert_eq!(output.total_tokens(), 10);
        assert_eq!(client.model_name(), "codellama:7b");
    }

    #[tokio::test]
    async fn test_client_maps_provider_error() {
        let client = LmClient::with_provider(Box::new(BrokenProvider));

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, Error::Lm(_)));
        assert_eq!(err.to_string(), "LM error: connection refused");
    }
}
