use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Reasoning strategy errors
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Validation failed: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Program execution timed out after {elapsed_ms}ms (budget: {budget_ms}ms)")]
    Timeout { elapsed_ms: u64, budget_ms: u64 },

    #[error("Thought generation failed: {message}")]
    Generation { message: String },

    #[error("Consensus failed: {message}")]
    Consensus { message: String },

    #[error("Reflection memory error: {message}")]
    Memory { message: String },
}

/// Tool execution errors surfaced by the injected executor
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool execution failed: {tool} - {message}")]
    Execution { tool: String, message: String },

    #[error("Unknown tool: {tool}")]
    UnknownTool { tool: String },

    #[error("Invalid input for {tool}: {message}")]
    InvalidInput { tool: String, message: String },
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for strategy operations
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Result type alias for tool execution
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");

        let err = AppError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");
    }

    #[test]
    fn test_strategy_error_display() {
        let err = StrategyError::Validation {
            field: "goal".to_string(),
            reason: "cannot be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Validation failed: goal - cannot be empty");

        let err = StrategyError::Timeout {
            elapsed_ms: 1200,
            budget_ms: 1000,
        };
        assert_eq!(
            err.to_string(),
            "Program execution timed out after 1200ms (budget: 1000ms)"
        );

        let err = StrategyError::Consensus {
            message: "no participants".to_string(),
        };
        assert_eq!(err.to_string(), "Consensus failed: no participants");

        let err = StrategyError::Memory {
            message: "store unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Reflection memory error: store unavailable"
        );
    }

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::Execution {
            tool: "reasoning.plan".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Tool execution failed: reasoning.plan - connection reset"
        );

        let err = ToolError::UnknownTool {
            tool: "nonexistent".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown tool: nonexistent");

        let err = ToolError::InvalidInput {
            tool: "probe.scan".to_string(),
            message: "missing target".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input for probe.scan: missing target"
        );
    }

    #[test]
    fn test_strategy_error_converts_to_app_error() {
        let err: AppError = StrategyError::Timeout {
            elapsed_ms: 5,
            budget_ms: 0,
        }
        .into();
        assert!(matches!(err, AppError::Strategy(_)));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_tool_error_converts_to_app_error() {
        let err: AppError = ToolError::UnknownTool {
            tool: "missing".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Tool(_)));
        assert!(err.to_string().contains("Unknown tool"));
    }
}
