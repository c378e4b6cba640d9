// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Prediction results from module execution

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a module prediction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prediction {
    /// Parsed output fields, keyed by field name
    pub outputs: HashMap<String, String>,

    /// Token usage, when the LM reports it
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,

    /// Completion tokens
    pub completion_tokens: u32,

    /// Total tokens
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Create new token usage
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

impl Prediction {
    /// Create a new empty prediction
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an output field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(|v| v.as_str())
    }

    /// Insert an output field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.outputs.insert(key.into(), value.into());
    }

    /// Attach token usage
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}
