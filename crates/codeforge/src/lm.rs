// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Language model client abstraction.
//!
//! The [`Lm`] trait is object-safe so that one shared client can be handed to
//! every module behind an `Arc<dyn Lm>`. Concrete HTTP-backed implementations
//! live in the `codeforge-client` crate; [`MockLm`] covers tests and examples.

use crate::error::Result;
use async_trait::async_trait;

/// Output from an LM generation request.
#[derive(Debug, Clone)]
pub struct LmOutput {
    /// The generated text.
    pub text: String,
    /// Number of prompt tokens used.
    pub prompt_tokens: u32,
    /// Number of completion tokens generated.
    pub completion_tokens: u32,
}

impl LmOutput {
    /// Create a new LmOutput with just the text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prompt_tokens: 0,
            completion_tokens: 0,
        }
    }

    /// Create a new LmOutput with token counts.
    pub fn with_tokens(text: impl Into<String>, prompt: u32, completion: u32) -> Self {
        Self {
            text: text.into(),
            prompt_tokens: prompt,
            completion_tokens: completion,
        }
    }

    /// Get the total token count.
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Trait for language model clients.
#[async_trait]
pub trait Lm: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<LmOutput>;

    /// Get the model name for logging.
    fn model_name(&self) -> &str {
        "unknown"
    }
}

/// A mock LM for testing and examples.
///
/// Uses a closure to produce responses synchronously, so pipeline behavior
/// can be exercised without a model server.
pub struct MockLm<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    generator: F,
    name: &'static str,
}

impl<F> MockLm<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    /// Create a new mock LM with the given generator function.
    pub fn new(generator: F) -> Self {
        Self {
            generator,
            name: "mock",
        }
    }

    /// Set the model name reported by this mock.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

#[async_trait]
impl<F> Lm for MockLm<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    async fn generate(&self, prompt: &str) -> Result<LmOutput> {
        Ok(LmOutput::new((self.generator)(prompt)))
    }

    fn model_name(&self) -> &str {
        self.name
    }
}
