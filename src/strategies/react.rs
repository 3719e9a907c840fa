//! ReAct reasoning strategy - bounded thought→action→observation loop.
//!
//! Each iteration plans a step, invokes the injected tool executor, records
//! the observation and checks for a final-answer signal. Cancellation is
//! cooperative: the token is checked before and after every step, and no
//! in-flight tool call is interrupted.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{answer_after_marker, strip_answer_marker};
use crate::events::{EventSink, ReasoningEvent};
use crate::steps::{ReasoningResult, ReasoningStep};
use crate::tools::ToolExecutor;

/// How many prior thoughts each step carries in its context trace.
const TRACE_WINDOW: usize = 3;

/// ReAct strategy executor.
///
/// Tool failures terminate the run with `success = false` and a structured
/// `{"error": ...}` observation; they are not retried here. Retry policy,
/// if any, belongs to the caller.
pub struct ReactExecutor {
    tools: Arc<dyn ToolExecutor>,
    events: Arc<dyn EventSink>,
    max_iterations: usize,
}

impl ReactExecutor {
    /// Create an executor with the given iteration cap (clamped to >= 1)
    pub fn new(
        tools: Arc<dyn ToolExecutor>,
        events: Arc<dyn EventSink>,
        max_iterations: usize,
    ) -> Self {
        Self {
            tools,
            events,
            max_iterations: max_iterations.max(1),
        }
    }

    /// The effective iteration cap
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run the loop until an answer, a tool failure, cancellation, or the cap
    pub async fn execute(&self, goal: &str, cancel: CancellationToken) -> ReasoningResult {
        self.emit("reasoning.started", goal, json!({}));
        debug!(goal = %goal, max_iterations = self.max_iterations, "ReAct loop starting");

        let mut path: Vec<ReasoningStep> = Vec::new();

        for index in 0..self.max_iterations {
            if cancel.is_cancelled() {
                return self.abort(goal, path);
            }

            let thought = if index == 0 {
                format!("plan step {}: {}", index + 1, goal)
            } else {
                format!("reflect step {}: {}", index + 1, goal)
            };
            let trace = build_trace(goal, &path);
            let input = plan_input(goal, index, &path);
            let step = ReasoningStep::new(thought)
                .with_action("reasoning.plan", input.clone())
                .with_trace(trace);

            let step = match self.tools.execute("reasoning.plan", input).await {
                Ok(observation) => step.with_observation(observation),
                Err(e) => {
                    warn!(goal = %goal, index = index, error = %e, "Tool failure, terminating run");
                    let step = step.with_observation(json!({"error": e.to_string()}));
                    path.push(step.clone());
                    self.emit(
                        "reasoning.step",
                        goal,
                        json!({"index": index, "step": step, "errored": true}),
                    );
                    self.emit(
                        "reasoning.completed",
                        goal,
                        json!({"success": false, "iterations": path.len()}),
                    );
                    return ReasoningResult::unanswered(path);
                }
            };

            path.push(step.clone());
            self.emit(
                "reasoning.step",
                goal,
                json!({"index": index, "step": step}),
            );

            if let Some(answer) = extract_final_answer(&step) {
                info!(goal = %goal, iterations = path.len(), "ReAct reached a final answer");
                self.emit(
                    "reasoning.completed",
                    goal,
                    json!({
                        "success": true,
                        "iterations": path.len(),
                        "finalAnswer": answer,
                    }),
                );
                return ReasoningResult::answered(answer, path);
            }

            if cancel.is_cancelled() {
                return self.abort(goal, path);
            }
        }

        info!(goal = %goal, iterations = path.len(), "ReAct cap exhausted without an answer");
        self.emit(
            "reasoning.completed",
            goal,
            json!({"success": false, "iterations": path.len()}),
        );
        ReasoningResult::unanswered(path)
    }

    fn abort(&self, goal: &str, path: Vec<ReasoningStep>) -> ReasoningResult {
        debug!(goal = %goal, iterations = path.len(), "ReAct run aborted");
        self.emit(
            "reasoning.aborted",
            goal,
            json!({"reason": "aborted", "iterations": path.len()}),
        );
        self.emit(
            "reasoning.completed",
            goal,
            json!({"success": false, "iterations": path.len()}),
        );
        ReasoningResult::unanswered(path)
    }

    fn emit(&self, name: &str, goal: &str, mut payload: Value) {
        if let Some(map) = payload.as_object_mut() {
            map.insert("goal".to_string(), json!(goal));
        }
        self.events.emit(ReasoningEvent::new(name, payload));
    }
}

/// Render the context window from the last prior steps, oldest-to-newest.
fn build_trace(goal: &str, path: &[ReasoningStep]) -> Vec<String> {
    if path.is_empty() {
        return vec![format!("goal:{}", goal)];
    }
    let start = path.len().saturating_sub(TRACE_WINDOW);
    path[start..]
        .iter()
        .enumerate()
        .map(|(offset, step)| format!("{}:{}", start + offset, step.thought))
        .collect()
}

/// Input payload for the planning tool: the goal, the step index, and the
/// prior thought/observation pairs.
fn plan_input(goal: &str, index: usize, path: &[ReasoningStep]) -> Value {
    let prior: Vec<Value> = path
        .iter()
        .map(|step| {
            json!({
                "thought": step.thought,
                "observation": step.observation,
            })
        })
        .collect();
    json!({"goal": goal, "step": index, "prior": prior})
}

/// Extract a final answer from a step, if one is signaled.
///
/// A `done == true` observation yields its `value` (or `summary`) with any
/// leading marker stripped; otherwise the thought text is scanned for the
/// marker followed by a `:`. Answers that trim to empty do not count.
fn extract_final_answer(step: &ReasoningStep) -> Option<String> {
    if let Some(observation) = &step.observation {
        if observation.get("done").and_then(Value::as_bool) == Some(true) {
            let payload = observation
                .get("value")
                .filter(|v| !v.is_null())
                .or_else(|| observation.get("summary").filter(|v| !v.is_null()));
            if let Some(value) = payload {
                let text = match value.as_str() {
                    Some(s) => strip_answer_marker(s),
                    None => value.to_string(),
                };
                if !text.trim().is_empty() {
                    return Some(text.trim().to_string());
                }
            }
        }
    }

    let answer = answer_after_marker(&step.thought)?;
    if answer.is_empty() {
        return None;
    }
    Some(answer)
}
