// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Tool abstraction for the ReAct reasoning loop.
//!
//! # Examples
//!
//! ```
//! use codeforge::tool::tool;
//!
//! let calc = tool("code_analysis")
//!     .description("Analyze code for potential issues")
//!     .execute(|input| Ok(format!("Analyzing: {}", input)));
//! ```

use crate::error::Result;
use std::future::Future;
use std::pin::Pin;

/// Trait for tools that can be invoked mid-reasoning.
///
/// Object-safe so an agent can hold a heterogeneous tool set; execution
/// returns a boxed future for that reason.
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Get the tool description for prompts.
    fn description(&self) -> &str;

    /// Execute the tool with the given input.
    fn execute<'a>(
        &'a self,
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

/// Start building a tool with the given name.
pub fn tool(name: &'static str) -> ToolBuilder {
    ToolBuilder::new(name)
}

/// Builder for constructing tools from closures.
pub struct ToolBuilder {
    name: &'static str,
    description: &'static str,
}

impl ToolBuilder {
    /// Create a new tool builder with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            description: "",
        }
    }

    /// Set the tool description.
    pub fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    /// Build a tool with a synchronous executor.
    pub fn execute<F>(self, f: F) -> FnTool<F>
    where
        F: Fn(&str) -> Result<String> + Send + Sync,
    {
        FnTool {
            name: self.name,
            description: self.description,
            executor: f,
        }
    }
}

/// A tool created from a synchronous closure.
pub struct FnTool<F> {
    name: &'static str,
    description: &'static str,
    executor: F,
}

impl<F> Tool for FnTool<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn execute<'a>(
        &'a self,
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        let result = (self.executor)(input);
        Box::pin(std::future::ready(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_tool() {
        let t = tool("echo")
            .description("Echo the input")
            .execute(|input| Ok(format!("echo: {}", input)));

        assert_eq!(t.name(), "echo");
        assert_eq!(t.description(), "Echo the input");
        assert_eq!(t.execute("hi").await.unwrap(), "echo: hi");
    }

    #[tokio::test]
    async fn test_tool_error() {
        let t = tool("broken").execute(|_| Err(crate::error::Error::tool("always fails")));

        let err = t.execute("x").await.unwrap_err();
        assert_eq!(err.to_string(), "Tool error: always fails");
    }

    #[tokio::test]
    async fn test_tool_as_trait_object() {
        use std::sync::Arc;

        let t: Arc<dyn Tool> = Arc::new(tool("fixed").execute(|_| Ok("42".to_string())));
        assert_eq!(t.execute("anything").await.unwrap(), "42");
    }
}
