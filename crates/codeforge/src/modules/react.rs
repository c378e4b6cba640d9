// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! ReAct (Reasoning + Acting) module
//!
//! Implements the ReAct pattern where the LM alternates between:
//! - Thought: reasoning about the current state
//! - Action: selecting and calling a tool
//! - Observation: receiving tool output
//!
//! The loop terminates when the LM emits `Final Answer:` followed by the
//! signature's labeled output fields, or when the iteration budget runs out.

use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::lm::Lm;
use crate::predict::Predict;
use crate::prediction::{Prediction, TokenUsage};
use crate::signature::Signature;
use crate::tool::Tool;
use std::sync::Arc;

const DEFAULT_MAX_ITERATIONS: u8 = 5;

/// ReAct module - Reasoning + Acting with tools.
pub struct ReAct {
    /// Prompt rendering and output parsing for the signature
    predict: Predict,
    /// Available tools
    tools: Vec<Arc<dyn Tool>>,
    /// Maximum thought-action-observation cycles
    max_iterations: u8,
}

/// A completed step in the ReAct trajectory.
#[derive(Debug, Clone)]
pub struct TrajectoryStep {
    /// The thought/reasoning
    pub thought: String,
    /// Tool name
    pub action: String,
    /// Input to the tool
    pub action_input: String,
    /// Tool output
    pub observation: String,
}

/// A single parsed LM step.
#[derive(Debug, Clone)]
pub enum ParsedStep {
    /// Continue with a tool call.
    Action {
        /// The thought preceding the action.
        thought: String,
        /// The tool name.
        action: String,
        /// The tool input.
        action_input: String,
    },
    /// Final answer reached; carries everything after the marker.
    FinalAnswer(String),
}

impl ReAct {
    /// Create a new ReAct module over the given signature and tool set.
    pub fn new(signature: Signature<'static>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            predict: Predict::new(signature),
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Configure max iterations.
    pub fn with_max_iterations(mut self, n: u8) -> Self {
        self.max_iterations = n;
        self
    }

    /// Get the underlying predict module.
    #[inline]
    pub fn predict(&self) -> &Predict {
        &self.predict
    }

    /// Get available tools.
    #[inline]
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Find tool by name.
    pub fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Build the ReAct prompt for the given inputs and trajectory so far.
    pub fn build_prompt(&self, inputs: &Inputs<'_>, trajectory: &[TrajectoryStep]) -> String {
        let signature = self.predict.signature();
        let mut prompt = String::new();

        prompt.push_str(&signature.instructions);
        prompt.push_str("\n\n");

        prompt.push_str("Available tools:\n");
        for tool in &self.tools {
            prompt.push_str("- ");
            prompt.push_str(tool.name());
            prompt.push_str(": ");
            prompt.push_str(tool.description());
            prompt.push('\n');
        }
        prompt.push('\n');

        prompt.push_str(
            "Use the following format:\n\
             Thought: reason about what to do\n\
             Action: tool_name\n\
             Action Input: input to the tool\n\
             Observation: tool output\n\
             ... (repeat as needed)\n\
             Thought: I now know the final answer\n\
             Final Answer: your answer\n\n",
        );

        let labels: Vec<String> = signature
            .output_fields
            .iter()
            .map(|f| format!("{}:", f.prefix))
            .collect();
        prompt.push_str("In the final answer, label each field: ");
        prompt.push_str(&labels.join(" ... "));
        prompt.push_str(" ...\n\n");

        for field in &signature.input_fields {
            if let Some(value) = inputs.get(&field.name) {
                prompt.push_str(&field.prefix);
                prompt.push_str(": ");
                prompt.push_str(value);
                prompt.push('\n');
            }
        }

        for step in trajectory {
            prompt.push_str("Thought: ");
            prompt.push_str(&step.thought);
            prompt.push('\n');

            prompt.push_str("Action: ");
            prompt.push_str(&step.action);
            prompt.push('\n');

            prompt.push_str("Action Input: ");
            prompt.push_str(&step.action_input);
            prompt.push('\n');

            prompt.push_str("Observation: ");
            prompt.push_str(&step.observation);
            prompt.push('\n');
        }

        prompt.push_str("Thought:");
        prompt
    }

    /// Parse a single step from an LM completion.
    pub fn parse_step(&self, response: &str) -> Option<ParsedStep> {
        if let Some(idx) = response.find("Final Answer:") {
            let answer = response[idx + "Final Answer:".len()..].trim();
            return Some(ParsedStep::FinalAnswer(answer.to_string()));
        }

        let action_idx = response.find("Action:")?;
        let thought = response[..action_idx]
            .trim()
            .trim_start_matches("Thought:")
            .trim()
            .to_string();

        let after_action = &response[action_idx + "Action:".len()..];
        let (action_line, rest) = after_action.split_once('\n').unwrap_or((after_action, ""));
        let action = action_line.trim().to_string();

        let input_idx = rest.find("Action Input:")?;
        let after_input = &rest[input_idx + "Action Input:".len()..];
        let action_input = after_input
            .split('\n')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        Some(ParsedStep::Action {
            thought,
            action,
            action_input,
        })
    }

    /// Run the reasoning loop to completion.
    pub async fn forward(&self, inputs: &Inputs<'_>, lm: &dyn Lm) -> Result<Prediction> {
        let mut trajectory: Vec<TrajectoryStep> = Vec::new();
        let mut prompt_tokens = 0u32;
        let mut completion_tokens = 0u32;

        for iteration in 0..self.max_iterations {
            let prompt = self.build_prompt(inputs, &trajectory);
            let output = lm.generate(&prompt).await?;
            prompt_tokens += output.prompt_tokens;
            completion_tokens += output.completion_tokens;

            match self.parse_step(&output.text) {
                Some(ParsedStep::FinalAnswer(answer)) => {
                    tracing::debug!(iteration, steps = trajectory.len(), "final answer reached");
                    let mut prediction = self.parse_final_answer(&answer);
                    prediction.usage = Some(TokenUsage::new(prompt_tokens, completion_tokens));
                    return Ok(prediction);
                }
                Some(ParsedStep::Action {
                    thought,
                    action,
                    action_input,
                }) => {
                    let observation = self.observe(&action, &action_input).await;
                    tracing::debug!(iteration, action = %action, "tool step");
                    trajectory.push(TrajectoryStep {
                        thought,
                        action,
                        action_input,
                        observation,
                    });
                }
                None => {
                    return Err(Error::module("Failed to parse ReAct step"));
                }
            }
        }

        Err(Error::module(format!(
            "No final answer after {} ReAct iterations",
            self.max_iterations
        )))
    }

    /// Execute the named tool, turning every failure into an observation.
    async fn observe(&self, action: &str, action_input: &str) -> String {
        match self.find_tool(action) {
            Some(tool) => match tool.execute(action_input).await {
                Ok(output) => output,
                Err(err) => format!("Tool failed: {}", err),
            },
            None => format!("Unknown tool: {}", action),
        }
    }

    /// Parse the output fields out of the final answer text.
    ///
    /// Falls back to using the whole answer when the signature has a single
    /// output field and the LM skipped the label.
    fn parse_final_answer(&self, answer: &str) -> Prediction {
        let mut prediction = self.predict.parse_response(answer);

        if prediction.outputs.is_empty() && !answer.is_empty() {
            if let [field] = self.predict.signature().output_fields.as_slice() {
                prediction.insert(field.name.to_string(), answer.to_string());
            }
        }

        prediction
    }
}
