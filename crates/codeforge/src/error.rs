// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for CodeForge

use thiserror::Error;

/// Result type alias for CodeForge operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the CodeForge library
#[derive(Error, Debug)]
pub enum Error {
    /// Signature-related errors
    #[error("Signature error: {0}")]
    Signature(String),

    /// Module execution errors
    #[error("Module error: {0}")]
    Module(String),

    /// Prediction parsing errors
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Language model call errors
    #[error("LM error: {0}")]
    Lm(String),

    /// Tool execution errors
    #[error("Tool error: {0}")]
    Tool(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a signature error
    pub fn signature(msg: impl Into<String>) -> Self {
        Self::Signature(msg.into())
    }

    /// Create a module error
    pub fn module(msg: impl Into<String>) -> Self {
        Self::Module(msg.into())
    }

    /// Create a prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create an LM error
    pub fn lm(msg: impl Into<String>) -> Self {
        Self::Lm(msg.into())
    }

    /// Create a tool error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Signature(_) => "signature",
            Self::Module(_) => "module",
            Self::Prediction(_) => "prediction",
            Self::Lm(_) => "lm",
            Self::Tool(_) => "tool",
            Self::Json(_) => "json",
            Self::Other(_) => "other",
        }
    }
}
