// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Provider abstraction for different LM backends

use crate::lm::LmConfig;
use crate::request::CompletionRequest;
use crate::response::{CompletionResponse, Usage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Type of LM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Ollama native API
    Ollama,
    /// Any OpenAI-compatible chat completions API
    OpenAiCompatible,
}

/// Provider trait for LM backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Complete a request
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
        config: &LmConfig,
    ) -> anyhow::Result<CompletionResponse>;

    /// Get provider kind
    fn kind(&self) -> ProviderKind;
}

/// Ollama provider using the native `/api/generate` endpoint
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a provider pointed at a local Ollama server
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new("http://localhost:11434")
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
        config: &LmConfig,
    ) -> anyhow::Result<CompletionResponse> {
        #[derive(Serialize)]
        struct Options {
            temperature: f32,
            num_predict: u32,
        }

        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            system: Option<&'a str>,
            stream: bool,
            options: Options,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            response: String,
            model: String,
            prompt_eval_count: Option<u32>,
            eval_count: Option<u32>,
            done_reason: Option<String>,
        }

        let req = OllamaRequest {
            model: &config.model,
            prompt: &request.prompt,
            system: request.system.as_deref(),
            stream: false,
            options: Options {
                temperature: request.temperature.unwrap_or(config.temperature),
                num_predict: request.max_tokens.unwrap_or(config.max_tokens),
            },
        };

        tracing::debug!(model = req.model, "sending Ollama generate request");

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<OllamaResponse>()
            .await?;

        let mut completion = CompletionResponse::new(response.response, response.model);

        if let (Some(prompt), Some(eval)) = (response.prompt_eval_count, response.eval_count) {
            completion = completion.with_usage(Usage::new(prompt, eval));
        }

        if let Some(reason) = response.done_reason {
            completion = completion.with_finish_reason(reason);
        }

        Ok(completion)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }
}

/// OpenAI-compatible chat completions provider
///
/// Works against any server that speaks the `/chat/completions` protocol,
/// including Ollama's compatibility endpoint at `/v1`.
pub struct OpenAiProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a provider pointed at an OpenAI-compatible server
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Set the bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
        config: &LmConfig,
    ) -> anyhow::Result<CompletionResponse> {
        #[derive(Serialize)]
        struct Message<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<Message<'a>>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
            usage: Option<ChatUsage>,
            model: String,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
            finish_reason: Option<String>,
        }

        #[derive(Deserialize)]
        struct ChatMessage {
            content: String,
        }

        #[derive(Deserialize)]
        struct ChatUsage {
            prompt_tokens: u32,
            completion_tokens: u32,
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: &request.prompt,
        });

        let req = ChatRequest {
            model: &config.model,
            messages,
            temperature: request.temperature.unwrap_or(config.temperature),
            max_tokens: request.max_tokens.unwrap_or(config.max_tokens),
        };

        tracing::debug!(model = req.model, "sending chat completions request");

        let mut http = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&req);
        if let Some(api_key) = &self.api_key {
            http = http.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = http
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No choices in response"))?;

        let mut completion = CompletionResponse::new(choice.message.content, response.model);

        if let Some(usage) = response.usage {
            completion =
                completion.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        if let Some(reason) = choice.finish_reason {
            completion = completion.with_finish_reason(reason);
        }

        Ok(completion)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAiCompatible
    }
}
