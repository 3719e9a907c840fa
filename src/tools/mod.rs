//! The tool-execution seam consumed by reasoning strategies.
//!
//! The actual tool transport (MCP, HTTP, in-process) lives outside this
//! crate; callers inject an implementation of [`ToolExecutor`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

/// Executes a named tool with a JSON input and returns its output.
///
/// Failures are returned as [`ToolError`]; the strategies decide whether a
/// failure becomes a structured observation (ReAct) or propagates.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute `tool` with `input`.
    async fn execute(&self, tool: &str, input: Value) -> ToolResult<Value>;
}

/// Adapter wrapping a plain function as a [`ToolExecutor`].
///
/// Useful for tests and for callers whose tool dispatch is synchronous.
pub struct FnToolExecutor<F>
where
    F: Fn(&str, &Value) -> ToolResult<Value> + Send + Sync,
{
    func: F,
}

impl<F> FnToolExecutor<F>
where
    F: Fn(&str, &Value) -> ToolResult<Value> + Send + Sync,
{
    /// Wrap a function as a tool executor
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> ToolExecutor for FnToolExecutor<F>
where
    F: Fn(&str, &Value) -> ToolResult<Value> + Send + Sync,
{
    async fn execute(&self, tool: &str, input: Value) -> ToolResult<Value> {
        (self.func)(tool, &input)
    }
}

/// Convenience constructor for an executor that fails every call.
///
/// Handy for exercising the tool-failure paths.
pub fn failing_executor(
    message: impl Into<String>,
) -> FnToolExecutor<impl Fn(&str, &Value) -> ToolResult<Value> + Send + Sync> {
    let message = message.into();
    FnToolExecutor::new(move |tool, _input| {
        Err(ToolError::Execution {
            tool: tool.to_string(),
            message: message.clone(),
        })
    })
}
