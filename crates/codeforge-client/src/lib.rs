// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! HTTP LM client for CodeForge
//!
//! Implements the [`codeforge::Lm`] trait over two backends: the native
//! Ollama generate API, and any OpenAI-compatible chat completions server.

pub mod lm;
pub mod provider;
pub mod request;
pub mod response;

pub use lm::{LmClient, LmConfig};
pub use provider::{OllamaProvider, OpenAiProvider, Provider, ProviderKind};
pub use request::CompletionRequest;
pub use response::{CompletionResponse, Usage};
