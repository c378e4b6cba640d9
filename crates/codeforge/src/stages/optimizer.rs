// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Code optimization stage.

use super::{require, StageModule, Strategy};
use crate::error::Result;
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::modules::{ChainOfThought, ReAct};
use crate::signature::{Signature, SignatureBuilder};
use crate::tool::{tool, Tool};
use std::sync::Arc;

/// Optimizer stage: rewrites source code guided by suggestions.
///
/// The suggestions input is taken at face value. When the analyzer failed,
/// its placeholder text arrives here as ordinary data and is passed to the
/// model unchanged.
pub struct Optimizer {
    module: StageModule,
}

impl Optimizer {
    /// Create an optimizer using the given prompting strategy.
    pub fn new(strategy: Strategy) -> Self {
        let signature = signature();
        let module = match strategy {
            Strategy::ChainOfThought => StageModule::Cot(ChainOfThought::new(signature)),
            Strategy::React => StageModule::React(ReAct::new(signature, stub_tools())),
        };
        Self { module }
    }

    /// Produce an optimized version of the given source code.
    ///
    /// Never fails: any module error is absorbed into placeholder text.
    pub async fn optimize(&self, code: &str, suggestions: &str, lm: &dyn Lm) -> String {
        let mut inputs = Inputs::new();
        inputs.insert("code", code);
        inputs.insert("suggestions", suggestions);

        match self.run(&inputs, lm).await {
            Ok(optimized) => optimized,
            Err(err) => {
                tracing::warn!(category = err.category(), %err, "optimization stage failed");
                format!("Optimization error: {}", err)
            }
        }
    }

    async fn run(&self, inputs: &Inputs<'_>, lm: &dyn Lm) -> Result<String> {
        let prediction = self.module.forward(inputs, lm).await?;
        Ok(require(&prediction, "optimized_code")?.to_string())
    }
}

fn signature() -> Signature<'static> {
    SignatureBuilder::new(
        "Given the fields `code`, `suggestions`, produce the fields `optimized_code`.",
    )
    .input("code", "Source code to improve")
    .input("suggestions", "Suggestions to apply")
    .output("optimized_code", "The improved code")
    .build()
}

/// Descriptive stub tools for the ReAct variant.
fn stub_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(
            tool("code_optimizer")
                .description("Tool for code optimization")
                .execute(|_| Ok("Optimizing code structure...".to_string())),
        ),
        Arc::new(
            tool("code_refactor")
                .description("Tool for code refactoring")
                .execute(|_| Ok("Refactoring code for better readability...".to_string())),
        ),
    ]
}
