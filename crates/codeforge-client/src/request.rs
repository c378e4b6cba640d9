// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Completion request types

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Request to a language model backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest<'a> {
    /// Prompt text
    #[serde(borrow)]
    pub prompt: Cow<'a, str>,

    /// Optional system prompt
    #[serde(borrow)]
    pub system: Option<Cow<'a, str>>,

    /// Override temperature
    pub temperature: Option<f32>,

    /// Override max tokens
    pub max_tokens: Option<u32>,
}

impl<'a> CompletionRequest<'a> {
    /// Create a request for the given prompt
    pub fn new(prompt: impl Into<Cow<'a, str>>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set system prompt
    pub fn with_system(mut self, system: impl Into<Cow<'a, str>>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
