// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! CodeForge: a staged LM pipeline for code review.
//!
//! Given a piece of source code, the pipeline asks a locally hosted language
//! model for three derived artifacts, in fixed order:
//!
//! 1. [`Analyzer`](stages::Analyzer) — issues and optimization suggestions
//! 2. [`Optimizer`](stages::Optimizer) — an improved version of the code,
//!    guided by the analyzer's suggestions
//! 3. [`TestGenerator`](stages::TestGenerator) — test cases and test code
//!
//! Stages run one of two prompting strategies ([`Strategy`]): plain
//! chain-of-thought, or a ReAct loop with descriptive stub tools. Stage
//! failures are contained as placeholder text; [`Forge::process`] always
//! returns a complete five-field [`Report`].
//!
//! # Example
//!
//! ```
//! use codeforge::{Forge, MockLm};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let lm = Arc::new(MockLm::new(|_| {
//!     "Issues: none\nSuggestions: none".to_string()
//! }));
//! let forge = Forge::new(lm);
//! let report = forge.process("def add(a, b): return a+b").await;
//! assert!(!report.issues.is_empty());
//! # }
//! ```

pub mod error;
pub mod field;
pub mod forge;
pub mod inputs;
pub mod lm;
pub mod modules;
pub mod predict;
pub mod prediction;
pub mod signature;
pub mod stages;
pub mod tool;

pub use error::{Error, Result};
pub use field::{Field, FieldType, InputField, OutputField};
pub use forge::{Forge, Report};
pub use inputs::Inputs;
pub use lm::{Lm, LmOutput, MockLm};
pub use modules::{ChainOfThought, ReAct};
pub use predict::Predict;
pub use prediction::{Prediction, TokenUsage};
pub use signature::{Signature, SignatureBuilder};
pub use stages::{Analysis, Analyzer, Optimizer, Strategy, TestGenerator, Tests};
pub use tool::{tool, Tool};
