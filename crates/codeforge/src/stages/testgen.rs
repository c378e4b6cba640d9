// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Test generation stage.

use super::{require, StageModule, Strategy};
use crate::error::Result;
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::modules::{ChainOfThought, ReAct};
use crate::signature::{Signature, SignatureBuilder};
use crate::tool::{tool, Tool};
use std::sync::Arc;

/// Output of the test generation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tests {
    /// Suggested test cases, described in prose.
    pub test_cases: String,
    /// Generated test code.
    pub test_code: String,
}

/// Test generator stage: derives test cases and test code from source code.
///
/// Operates on the original code only; it is independent of the analyzer and
/// optimizer outputs.
pub struct TestGenerator {
    module: StageModule,
}

impl TestGenerator {
    /// Create a test generator using the given prompting strategy.
    pub fn new(strategy: Strategy) -> Self {
        let signature = signature();
        let module = match strategy {
            Strategy::ChainOfThought => StageModule::Cot(ChainOfThought::new(signature)),
            Strategy::React => StageModule::React(ReAct::new(signature, stub_tools())),
        };
        Self { module }
    }

    /// Generate tests for the given source code.
    ///
    /// Never fails: any module error is absorbed into placeholder text.
    pub async fn create_tests(&self, code: &str, lm: &dyn Lm) -> Tests {
        let mut inputs = Inputs::new();
        inputs.insert("code", code);

        match self.run(&inputs, lm).await {
            Ok(tests) => tests,
            Err(err) => {
                tracing::warn!(category = err.category(), %err, "test generation stage failed");
                Tests {
                    test_cases: format!("Test generation failed: {}", err),
                    test_code: "Unable to generate test code".to_string(),
                }
            }
        }
    }

    async fn run(&self, inputs: &Inputs<'_>, lm: &dyn Lm) -> Result<Tests> {
        let prediction = self.module.forward(inputs, lm).await?;
        Ok(Tests {
            test_cases: require(&prediction, "test_cases")?.to_string(),
            test_code: require(&prediction, "test_code")?.to_string(),
        })
    }
}

fn signature() -> Signature<'static> {
    SignatureBuilder::new(
        "Given the fields `code`, produce the fields `test_cases`, `test_code`.",
    )
    .input("code", "Source code to test")
    .output("test_cases", "Test cases worth covering")
    .output("test_code", "Runnable test code")
    .build()
}

/// Descriptive stub tools for the ReAct variant.
fn stub_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(
            tool("test_case_generator")
                .description("Tool for generating test cases")
                .execute(|_| Ok("Generating test cases...".to_string())),
        ),
        Arc::new(
            tool("test_code_writer")
                .description("Tool for writing test code")
                .execute(|_| Ok("Writing test code implementation...".to_string())),
        ),
    ]
}
