// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Code analysis stage.

use super::{require, StageModule, Strategy};
use crate::error::Result;
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::modules::{ChainOfThought, ReAct};
use crate::prediction::Prediction;
use crate::signature::{Signature, SignatureBuilder};
use crate::tool::{tool, Tool};
use std::sync::Arc;

/// Output of the analysis stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Detected issues.
    pub issues: String,
    /// Optimization suggestions, fed to the optimizer stage.
    pub suggestions: String,
}

/// Analyzer stage: reviews source code for issues and suggestions.
pub struct Analyzer {
    module: StageModule,
}

impl Analyzer {
    /// Create an analyzer using the given prompting strategy.
    pub fn new(strategy: Strategy) -> Self {
        let signature = signature();
        let module = match strategy {
            Strategy::ChainOfThought => StageModule::Cot(ChainOfThought::new(signature)),
            Strategy::React => StageModule::React(ReAct::new(signature, stub_tools())),
        };
        Self { module }
    }

    /// Analyze the given source code.
    ///
    /// Never fails: any module error is absorbed into placeholder text so
    /// the rest of the pipeline keeps running.
    pub async fn analyze(&self, code: &str, lm: &dyn Lm) -> Analysis {
        let mut inputs = Inputs::new();
        inputs.insert("code", code);

        match self.run(&inputs, lm).await {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(category = err.category(), %err, "analysis stage failed");
                Analysis {
                    issues: format!("Analysis error: {}", err),
                    suggestions: "No suggestions available".to_string(),
                }
            }
        }
    }

    async fn run(&self, inputs: &Inputs<'_>, lm: &dyn Lm) -> Result<Analysis> {
        let prediction: Prediction = self.module.forward(inputs, lm).await?;
        Ok(Analysis {
            issues: require(&prediction, "issues")?.to_string(),
            suggestions: require(&prediction, "suggestions")?.to_string(),
        })
    }
}

fn signature() -> Signature<'static> {
    SignatureBuilder::new("Given the fields `code`, produce the fields `issues`, `suggestions`.")
        .input("code", "Source code to review")
        .output("issues", "Problems detected in the code")
        .output("suggestions", "How to improve the code")
        .build()
}

/// Descriptive stub tools for the ReAct variant.
fn stub_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(
            tool("code_analysis")
                .description("Tool for analyzing code issues")
                .execute(|_| Ok("Analyzing code for potential issues...".to_string())),
        ),
        Arc::new(
            tool("suggestion_generator")
                .description("Tool for generating suggestions")
                .execute(|_| {
                    Ok("Generating optimization suggestions based on issues...".to_string())
                }),
        ),
    ]
}
