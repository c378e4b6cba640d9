// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Pipeline stages.
//!
//! Each stage wraps one prompting module over a fixed signature and applies
//! the failure-containment policy: a failed model call (or a completion that
//! is missing a labeled output field) is converted into fixed placeholder
//! text, never propagated. Placeholder text flows downstream as ordinary
//! data.

mod analyzer;
mod optimizer;
mod testgen;

pub use analyzer::{Analysis, Analyzer};
pub use optimizer::Optimizer;
pub use testgen::{TestGenerator, Tests};

use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::modules::{ChainOfThought, ReAct};
use crate::prediction::Prediction;

/// Prompting strategy shared by all stages of a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Direct chain-of-thought prompting, one call per stage.
    #[default]
    ChainOfThought,
    /// Tool-augmented reasoning loop per stage.
    React,
}

/// The module driving a stage, chosen by [`Strategy`].
pub(crate) enum StageModule {
    Cot(ChainOfThought),
    React(ReAct),
}

impl StageModule {
    pub(crate) async fn forward(&self, inputs: &Inputs<'_>, lm: &dyn Lm) -> Result<Prediction> {
        let prediction = match self {
            Self::Cot(module) => module.forward(inputs, lm).await?,
            Self::React(module) => module.forward(inputs, lm).await?,
        };
        if let Some(usage) = prediction.usage {
            tracing::debug!(total_tokens = usage.total_tokens, "module call complete");
        }
        Ok(prediction)
    }
}

/// Fetch a required output field from a prediction.
pub(crate) fn require<'p>(prediction: &'p Prediction, field: &str) -> Result<&'p str> {
    prediction
        .get(field)
        .ok_or_else(|| Error::prediction(format!("missing output field `{}`", field)))
}
