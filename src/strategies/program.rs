//! Program-of-Thought strategy - deterministic arithmetic execution traces.
//!
//! Instead of free-form reasoning, the problem text is compiled into an
//! auditable program: one `parse` step per numeric literal, then a single
//! reducing fold. A wall-clock budget guards every step; exceeding it is a
//! hard failure surfaced to the caller.

use std::time::Instant;

use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{StrategyError, StrategyResult};
use crate::steps::ProgramStep;

/// Execution bounds for one program run.
#[derive(Debug, Clone)]
pub struct ProgramLimits {
    /// Wall-clock budget in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProgramLimits {
    fn default() -> Self {
        Self { timeout_ms: 1000 }
    }
}

impl ProgramLimits {
    /// Create limits with an explicit budget
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }
}

/// Output of a program run: the step sequence, the final value, and the
/// human-readable trace lines.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProgramOutput {
    /// Steps in evaluation (and therefore dependency) order.
    pub steps: Vec<ProgramStep>,
    /// Trace lines, one per step (`"x0=2"`).
    pub trace: Vec<String>,
    /// The folded final value.
    pub result: Value,
}

/// Program-of-Thought strategy executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramOfThought;

impl ProgramOfThought {
    /// Create an executor
    pub fn new() -> Self {
        Self
    }

    /// Compile and run the arithmetic program for `problem`.
    ///
    /// The guard is cooperative wall-clock time, checked before every parse
    /// step and on every fold; `timeout_ms = 0` therefore always fails.
    pub fn run(&self, problem: &str, limits: ProgramLimits) -> StrategyResult<ProgramOutput> {
        let start = Instant::now();
        debug!(problem = %problem, timeout_ms = limits.timeout_ms, "Program run starting");

        let numbers = extract_numbers(problem);
        let mut steps: Vec<ProgramStep> = Vec::with_capacity(numbers.len() + 1);
        let mut trace: Vec<String> = Vec::with_capacity(numbers.len() + 1);

        for (index, value) in numbers.iter().enumerate() {
            check_budget(start, limits.timeout_ms)?;
            let variable = format!("x{}", index);
            trace.push(format!("{}={}", variable, format_number(*value)));
            steps.push(ProgramStep {
                variable,
                operation: "parse".to_string(),
                result: Some(number_value(*value)),
                deps: Vec::new(),
            });
        }

        let multiply = wants_product(problem);
        let (operation, seed) = if multiply { ("multiply", 1.0) } else { ("add", 0.0) };

        let mut folded = seed;
        for value in &numbers {
            check_budget(start, limits.timeout_ms)?;
            folded = if multiply {
                folded * value
            } else {
                folded + value
            };
        }

        let final_variable = format!("x{}", numbers.len());
        trace.push(format!("{}={}", final_variable, format_number(folded)));
        steps.push(ProgramStep {
            variable: final_variable,
            operation: operation.to_string(),
            result: Some(number_value(folded)),
            deps: (0..numbers.len()).map(|i| format!("x{}", i)).collect(),
        });

        info!(
            steps = steps.len(),
            operation = operation,
            latency_ms = start.elapsed().as_millis() as u64,
            "Program run completed"
        );

        Ok(ProgramOutput {
            steps,
            trace,
            result: number_value(folded),
        })
    }
}

/// Extract numeric literals in left-to-right order; `[0]` when none exist.
fn extract_numbers(problem: &str) -> Vec<f64> {
    // The pattern is fixed, so compilation cannot fail at runtime
    let pattern = Regex::new(r"-?\d+(?:\.\d+)?").expect("static number pattern");
    let numbers: Vec<f64> = pattern
        .find_iter(problem)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();
    if numbers.is_empty() {
        vec![0.0]
    } else {
        numbers
    }
}

/// True when the problem asks for a product rather than a sum.
fn wants_product(problem: &str) -> bool {
    let lowered = problem.to_lowercase();
    lowered.contains("product") || lowered.contains("multiply")
}

fn check_budget(start: Instant, timeout_ms: u64) -> StrategyResult<()> {
    let elapsed = start.elapsed().as_millis() as u64;
    if elapsed >= timeout_ms {
        return Err(StrategyError::Timeout {
            elapsed_ms: elapsed,
            budget_ms: timeout_ms,
        });
    }
    Ok(())
}

/// Render whole values without a decimal point (`5`, not `5.0`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// JSON value for a computed number, preferring integers for whole values.
fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}
