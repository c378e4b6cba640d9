// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Pipeline orchestrator.
//!
//! [`Forge`] runs the three stages strictly in order: analyze, optimize
//! (consuming the analyzer's suggestions), generate tests (consuming only
//! the original code). Failures never cross stage boundaries; each stage
//! substitutes placeholder text on error, so `process` itself is infallible.

use crate::lm::Lm;
use crate::stages::{Analyzer, Optimizer, Strategy, TestGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The five-field result record of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Detected issues.
    pub issues: String,
    /// Optimization suggestions.
    pub suggestions: String,
    /// Improved version of the input code.
    pub optimized_code: String,
    /// Suggested test cases.
    pub test_cases: String,
    /// Generated test code.
    pub test_code: String,
}

/// The three-stage pipeline over one shared LM client.
pub struct Forge {
    lm: Arc<dyn Lm>,
    analyzer: Analyzer,
    optimizer: Optimizer,
    tester: TestGenerator,
}

impl Forge {
    /// Create a pipeline with the default chain-of-thought strategy.
    pub fn new(lm: Arc<dyn Lm>) -> Self {
        Self::with_strategy(lm, Strategy::default())
    }

    /// Create a pipeline with an explicit prompting strategy.
    pub fn with_strategy(lm: Arc<dyn Lm>, strategy: Strategy) -> Self {
        Self {
            lm,
            analyzer: Analyzer::new(strategy),
            optimizer: Optimizer::new(strategy),
            tester: TestGenerator::new(strategy),
        }
    }

    /// Run the full pipeline over the given source code.
    pub async fn process(&self, code: &str) -> Report {
        let lm = self.lm.as_ref();

        tracing::info!(model = lm.model_name(), "pipeline started");

        let analysis = self.analyzer.analyze(code, lm).await;
        tracing::debug!("analysis stage done");

        let optimized_code = self
            .optimizer
            .optimize(code, &analysis.suggestions, lm)
            .await;
        tracing::debug!("optimization stage done");

        let tests = self.tester.create_tests(code, lm).await;
        tracing::debug!("test generation stage done");

        Report {
            issues: analysis.issues,
            suggestions: analysis.suggestions,
            optimized_code,
            test_cases: tests.test_cases,
            test_code: tests.test_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lm::MockLm;

    fn scripted_lm() -> MockLm<impl Fn(&str) -> String + Send + Sync> {
        // Dispatch on the stage instructions embedded in the prompt
        MockLm::new(|prompt| {
            if prompt.contains("`test_cases`") {
                "Test Cases: basic addition\nTest Code: assert add(1, 1) == 2".to_string()
            } else if prompt.contains("`optimized_code`") {
                "Optimized Code: def add(a: int, b: int) -> int: return a + b".to_string()
            } else {
                "Issues: no type hints\nSuggestions: annotate parameters".to_string()
            }
        })
    }

    #[tokio::test]
    async fn test_process_populates_all_fields() {
        let forge = Forge::new(Arc::new(scripted_lm()));

        let report = forge.process("def add(a, b): return a+b").await;
        assert_eq!(report.issues, "no type hints");
        assert_eq!(report.suggestions, "annotate parameters");
        assert_eq!(
            report.optimized_code,
            "def add(a: int, b: int) -> int: return a + b"
        );
        assert_eq!(report.test_cases, "basic addition");
        assert_eq!(report.test_code, "assert add(1, 1) == 2");
    }

    #[test]
    fn test_report_serializes_with_five_fields() {
        let report = Report {
            issues: "i".to_string(),
            suggestions: "s".to_string(),
            optimized_code: "o".to_string(),
            test_cases: "tc".to_string(),
            test_code: "t".to_string(),
        };

        let value = serde_json::to_value(&report).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for key in [
            "issues",
            "suggestions",
            "optimized_code",
            "test_cases",
            "test_code",
        ] {
            assert!(object.contains_key(key), "missing field {}", key);
        }
    }
}
