// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Chain of Thought module
//!
//! Implements the Chain of Thought (CoT) reasoning strategy where the LM
//! is prompted to show its reasoning steps before providing the labeled
//! output fields.

use crate::error::Result;
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::predict::Predict;
use crate::prediction::{Prediction, TokenUsage};
use crate::signature::Signature;

const COT_PREAMBLE: &str = "Let's think step by step.";

/// Chain of Thought module.
///
/// Wraps a [`Predict`] module and adds a `Reasoning:` section to the prompt,
/// asking the LM to show its work before answering.
#[derive(Debug, Clone)]
pub struct ChainOfThought {
    /// The underlying predict module
    predict: Predict,
    /// Label for the reasoning section
    reasoning_label: &'static str,
    /// Whether to carry the rationale into the prediction
    include_rationale: bool,
}

impl ChainOfThought {
    /// Create a new ChainOfThought module over the given signature.
    pub fn new(signature: Signature<'static>) -> Self {
        Self {
            predict: Predict::new(signature),
            reasoning_label: "Reasoning",
            include_rationale: false,
        }
    }

    /// Configure whether the rationale is kept as a `reasoning` output field.
    pub fn with_rationale(mut self, include: bool) -> Self {
        self.include_rationale = include;
        self
    }

    /// Get the underlying predict module.
    #[inline]
    pub fn predict(&self) -> &Predict {
        &self.predict
    }

    /// Build the CoT prompt for the given inputs.
    pub fn build_prompt(&self, inputs: &Inputs<'_>) -> String {
        let mut prompt = String::new();

        prompt.push_str(COT_PREAMBLE);
        prompt.push_str("\n\n");

        prompt.push_str(&self.predict.signature().instructions);
        prompt.push_str("\n\n");

        prompt.push_str("Now:\n");
        for field in &self.predict.signature().input_fields {
            if let Some(value) = inputs.get(&field.name) {
                prompt.push_str(&field.prefix);
                prompt.push_str(": ");
                prompt.push_str(value);
                prompt.push('\n');
            }
        }

        prompt.push('\n');
        prompt.push_str(self.reasoning_label);
        prompt.push(':');

        prompt
    }

    /// Parse a CoT completion, separating reasoning from the output fields.
    pub fn parse_response(&self, text: &str) -> Prediction {
        let mut prediction = self.predict.parse_response(text);

        if self.include_rationale {
            if let Some(reasoning) = self.extract_reasoning(text) {
                prediction.insert("reasoning", reasoning);
            }
        }

        prediction
    }

    /// Build the prompt, call the LM, and parse the completion.
    pub async fn forward(&self, inputs: &Inputs<'_>, lm: &dyn Lm) -> Result<Prediction> {
        let prompt = self.build_prompt(inputs);
        let output = lm.generate(&prompt).await?;

        let mut prediction = self.parse_response(&output.text);
        prediction.usage = Some(TokenUsage::new(
            output.prompt_tokens,
            output.completion_tokens,
        ));
        Ok(prediction)
    }

    /// Extract the reasoning text, which ends at the first output label.
    fn extract_reasoning(&self, text: &str) -> Option<String> {
        let label = format!("{}:", self.reasoning_label);
        let start = text.find(&label).map(|i| i + label.len()).unwrap_or(0);

        let end = self
            .predict
            .signature()
            .output_fields
            .iter()
            .filter_map(|field| text.find(&format!("{}:", field.prefix)))
            .filter(|&i| i >= start)
            .min()
            .unwrap_or(text.len());

        let reasoning = text[start..end].trim();
        if reasoning.is_empty() {
            None
        } else {
            Some(reasoning.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lm::MockLm;

    fn cot() -> ChainOfThought {
        ChainOfThought::new(Signature::parse("code -> issues, suggestions").unwrap())
    }

    #[test]
    fn test_build_prompt_has_reasoning_cue() {
        let mut inputs = Inputs::new();
        inputs.insert("code", "x = 1");

        let prompt = cot().build_prompt(&inputs);
        assert!(prompt.starts_with("Let's think step by step."));
        assert!(prompt.contains("Code: x = 1"));
        assert!(prompt.ends_with("Reasoning:"));
    }

    #[test]
    fn test_parse_strips_reasoning() {
        let pred = cot().parse_response(
            "Reasoning: the code rebinds a builtin.\nIssues: shadows `sum`\nSuggestions: rename",
        );
        assert_eq!(pred.get("issues"), Some("shadows `sum`"));
        assert_eq!(pred.get("suggestions"), Some("rename"));
        assert_eq!(pred.get("reasoning"), None);
    }

    #[test]
    fn test_parse_keeps_rationale_when_configured() {
        let pred = cot().with_rationale(true).parse_response(
            "Reasoning: step one.\nstep two.\nIssues: none\nSuggestions: none needed",
        );
        assert_eq!(pred.get("reasoning"), Some("step one.\nstep two."));
        assert_eq!(pred.get("issues"), Some("none"));
    }

    #[tokio::test]
    async fn test_forward_with_mock_lm() {
        let lm = MockLm::new(|prompt| {
            assert!(prompt.contains("Let's think step by step."));
            "Reasoning: fine.\nIssues: none\nSuggestions: add tests".to_string()
        });

        let mut inputs = Inputs::new();
        inputs.insert("code", "def f(): pass");

        let pred = cot().forward(&inputs, &lm).await.unwrap();
        assert_eq!(pred.get("issues"), Some("none"));
        assert_eq!(pred.get("suggestions"), Some("add tests"));
    }
}
