// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Predict module for LM-based predictions.
//!
//! [`Predict`] is the fundamental prompting module: it renders a signature's
//! instructions and labeled input fields into a completion prompt, and parses
//! labeled output fields back out of the completion text.

use crate::error::Result;
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::prediction::{Prediction, TokenUsage};
use crate::signature::Signature;

/// Predict module that uses an LM to generate structured predictions.
#[derive(Debug, Clone)]
pub struct Predict {
    /// The signature defining inputs/outputs
    signature: Signature<'static>,
}

impl Predict {
    /// Create a new Predict module.
    pub fn new(signature: Signature<'static>) -> Self {
        Self { signature }
    }

    /// Get the signature.
    #[inline]
    pub fn signature(&self) -> &Signature<'static> {
        &self.signature
    }

    /// Build the completion prompt for the given inputs.
    pub fn build_prompt(&self, inputs: &Inputs<'_>) -> String {
        let mut prompt = String::new();

        prompt.push_str(&self.signature.instructions);
        prompt.push_str("\n\n");

        prompt.push_str("Now:\n");
        for field in &self.signature.input_fields {
            if let Some(value) = inputs.get(&field.name) {
                prompt.push_str(&field.prefix);
                prompt.push_str(": ");
                prompt.push_str(value);
                prompt.push('\n');
            }
        }

        // Cue the model with the expected output labels
        prompt.push('\n');
        for field in &self.signature.output_fields {
            prompt.push_str(&field.prefix);
            prompt.push_str(":\n");
        }

        prompt
    }

    /// Parse labeled output fields out of an LM completion.
    ///
    /// A field's value starts after its `Label:` marker and runs until the
    /// next known output label or the end of the text, so multi-line values
    /// (code blocks in particular) are preserved.
    pub fn parse_response(&self, text: &str) -> Prediction {
        let mut prediction = Prediction::new();

        // First occurrence of each output label in the completion
        let marks: Vec<(usize, usize, usize)> = self
            .signature
            .output_fields
            .iter()
            .enumerate()
            .filter_map(|(idx, field)| {
                let label = format!("{}:", field.prefix);
                text.find(&label)
                    .map(|start| (idx, start, start + label.len()))
            })
            .collect();

        for &(idx, _, value_start) in &marks {
            let value_end = marks
                .iter()
                .filter(|&&(other, start, _)| other != idx && start >= value_start)
                .map(|&(_, start, _)| start)
                .min()
                .unwrap_or(text.len());

            let value = text[value_start..value_end].trim();
            if !value.is_empty() {
                prediction.insert(
                    self.signature.output_fields[idx].name.to_string(),
                    value.to_string(),
                );
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lm::MockLm;

    fn analyzer_predict() -> Predict {
        Predict::new(Signature::parse("code -> issues, suggestions").unwrap())
    }

    #[test]
    fn test_build_prompt() {
        let predict = analyzer_predict();

        let mut inputs = Inputs::new();
        inputs.insert("code", "def add(a, b): return a+b");

        let prompt = predict.build_prompt(&inputs);
        assert!(prompt.contains("Given the fields `code`"));
        assert!(prompt.contains("Code: def add(a, b): return a+b"));
        assert!(prompt.contains("Issues:"));
        assert!(prompt.contains("Suggestions:"));
    }

    #[test]
    fn test_parse_response_simple() {
        let predict = analyzer_predict();

        let pred = predict.parse_response("Issues: no docstring\nSuggestions: add one");
        assert_eq!(pred.get("issues"), Some("no docstring"));
        assert_eq!(pred.get("suggestions"), Some("add one"));
    }

    #[test]
    fn test_parse_response_multiline_value() {
        let predict = Predict::new(Signature::parse("code -> optimized_code").unwrap());

        let pred = predict.parse_response("Optimized Code:\ndef add(a: int, b: int) -> int:\n    return a + b\n");
        assert_eq!(
            pred.get("optimized_code"),
            Some("def add(a: int, b: int) -> int:\n    return a + b")
        );
    }

    #[test]
    fn test_parse_response_missing_field() {
        let predict = analyzer_predict();

        let pred = predict.parse_response("Issues: none");
        assert_eq!(pred.get("issues"), Some("none"));
        assert_eq!(pred.get("suggestions"), None);
    }

    #[test]
    fn test_parse_response_empty_value_is_missing() {
        let predict = analyzer_predict();

        let pred = predict.parse_response("Issues:\nSuggestions:");
        assert_eq!(pred.get("issues"), None);
        assert_eq!(pred.get("suggestions"), None);
    }

    #[tokio::test]
    async fn test_forward_with_mock_lm() {
        let predict = analyzer_predict();
        let lm = MockLm::new(|_| "Issues: shadowed builtin\nSuggestions: rename it".to_string());

        let mut inputs = Inputs::new();
        inputs.insert("code", "sum = 1");

        let pred = predict.forward(&inputs, &lm).await.unwrap();
        assert_eq!(pred.get("issues"), Some("shadowed builtin"));
        assert_eq!(pred.get("suggestions"), Some("rename it"));
        assert!(pred.usage.is_some());
    }
}
