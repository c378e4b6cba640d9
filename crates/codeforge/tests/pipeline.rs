// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! End-to-end pipeline tests over mock LM clients.

use async_trait::async_trait;
use codeforge::{Error, Forge, Lm, LmOutput, Result, Strategy};
use std::sync::{Arc, Mutex};

/// Records every prompt and replays canned stage responses, optionally
/// failing specific calls (1-based call numbers).
struct ScriptedLm {
    prompts: Mutex<Vec<String>>,
    fail_calls: Vec<u32>,
}

impl ScriptedLm {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail_calls: Vec::new(),
        }
    }

    fn failing_on(calls: &[u32]) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail_calls: calls.to_vec(),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Lm for ScriptedLm {
    async fn generate(&self, prompt: &str) -> Result<LmOutput> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() as u32
        };

        if self.fail_calls.contains(&call) {
            return Err(Error::lm("model server unavailable"));
        }

        let text = if prompt.contains("`test_cases`") {
            "Reasoning: cover edge cases.\n\
             Test Cases: empty input, large numbers\n\
             Test Code: def test_add():\n    assert add(2, 2) == 4"
        } else if prompt.contains("`optimized_code`") {
            "Reasoning: apply the suggestions.\n\
             Optimized Code: def add(a: int, b: int) -> int:\n    return a + b"
        } else {
            "Reasoning: the function works but is unannotated.\n\
             Issues: missing type hints\n\
             Suggestions: annotate the parameters"
        };
        Ok(LmOutput::with_tokens(text, 40, 20))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn process_returns_all_five_fields_non_empty() {
    let lm = Arc::new(ScriptedLm::new());
    let forge = Forge::new(lm.clone());

    let report = forge.process("def add(a, b): return a+b").await;

    assert!(!report.issues.is_empty());
    assert!(!report.suggestions.is_empty());
    assert!(!report.optimized_code.is_empty());
    assert!(!report.test_cases.is_empty());
    assert!(!report.test_code.is_empty());
    assert_eq!(report.issues, "missing type hints");
    assert_eq!(
        report.optimized_code,
        "def add(a: int, b: int) -> int:\n    return a + b"
    );
}

#[tokio::test]
async fn stages_run_in_fixed_order() {
    let lm = Arc::new(ScriptedLm::new());
    let forge = Forge::new(lm.clone());

    forge.process("x = 1").await;

    let prompts = lm.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("`issues`"), "analyzer must run first");
    assert!(
        prompts[1].contains("`optimized_code`"),
        "optimizer must run second"
    );
    assert!(
        prompts[2].contains("`test_cases`"),
        "test generator must run last"
    );
}

#[tokio::test]
async fn analyzer_failure_feeds_placeholder_into_optimizer() {
    let lm = Arc::new(ScriptedLm::failing_on(&[1]));
    let forge = Forge::new(lm.clone());

    let report = forge.process("x = 1").await;

    assert_eq!(
        report.issues,
        "Analysis error: LM error: model server unavailable"
    );
    assert_eq!(report.suggestions, "No suggestions available");

    // The optimizer still ran, with the placeholder as ordinary input
    let prompts = lm.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[1].contains("Suggestions: No suggestions available"));
    assert!(!report.optimized_code.is_empty());
    assert_eq!(report.test_cases, "empty input, large numbers");
}

#[tokio::test]
async fn test_generator_failure_leaves_other_stages_untouched() {
    let lm = Arc::new(ScriptedLm::failing_on(&[3]));
    let forge = Forge::new(lm.clone());

    let report = forge.process("x = 1").await;

    assert_eq!(report.issues, "missing type hints");
    assert_eq!(report.suggestions, "annotate the parameters");
    assert!(report.optimized_code.starts_with("def add"));
    assert_eq!(
        report.test_cases,
        "Test generation failed: LM error: model server unavailable"
    );
    assert_eq!(report.test_code, "Unable to generate test code");
}

#[tokio::test]
async fn every_stage_failing_still_yields_a_complete_report() {
    let lm = Arc::new(ScriptedLm::failing_on(&[1, 2, 3]));
    let forge = Forge::new(lm);

    let report = forge.process("x = 1").await;

    assert!(report.issues.starts_with("Analysis error:"));
    assert_eq!(report.suggestions, "No suggestions available");
    assert!(report.optimized_code.starts_with("Optimization error:"));
    assert!(report.test_cases.starts_with("Test generation failed:"));
    assert_eq!(report.test_code, "Unable to generate test code");
}

/// Replays a ReAct conversation: one tool step, then a final answer.
struct ReactScriptedLm {
    calls: Mutex<u32>,
}

#[async_trait]
impl Lm for ReactScriptedLm {
    async fn generate(&self, prompt: &str) -> Result<LmOutput> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;

        // Stages run in order, two calls each: a tool step, then the answer
        let text = if *calls % 2 == 1 {
            let action = if prompt.contains("`test_cases`") {
                "test_case_generator"
            } else if prompt.contains("`optimized_code`") {
                "code_optimizer"
            } else {
                "code_analysis"
            };
            format!("inspect the code\nAction: {}\nAction Input: x = 1\n", action)
        } else if prompt.contains("`test_cases`") {
            "Final Answer: Test Cases: basics\nTest Code: assert f() is None".to_string()
        } else if prompt.contains("`optimized_code`") {
            "Final Answer: Optimized Code: x = 1".to_string()
        } else {
            "Final Answer: Issues: none\nSuggestions: keep it simple".to_string()
        };
        Ok(LmOutput::new(text))
    }
}

#[tokio::test]
async fn react_variant_completes_all_stages() {
    let lm = Arc::new(ReactScriptedLm {
        calls: Mutex::new(0),
    });
    let forge = Forge::with_strategy(lm.clone(), Strategy::React);

    let report = forge.process("x = 1").await;

    assert_eq!(report.issues, "none");
    assert_eq!(report.suggestions, "keep it simple");
    assert_eq!(report.optimized_code, "x = 1");
    assert_eq!(report.test_cases, "basics");
    assert_eq!(report.test_code, "assert f() is None");

    // Each stage took one tool step plus one final answer
    assert_eq!(*lm.calls.lock().unwrap(), 6);
}
