//! Shared step and result records used by all reasoning strategies.
//!
//! These are plain data carriers: the strategies in [`crate::strategies`]
//! append to them, the graph tracker in [`crate::graph`] consumes them, and
//! the orchestrator in [`crate::engine`] projects them into outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A tool invocation attached to a reasoning step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepAction {
    /// The tool name to invoke.
    pub tool: String,
    /// Input payload handed to the tool executor.
    pub input: Value,
}

/// A single step in a reasoning path.
///
/// Steps are append-only; `trace` captures a bounded window (last 3) of
/// prior thoughts for context, ordered oldest-to-newest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// The internal thought for this step.
    pub thought: String,
    /// Optional tool action taken at this step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<StepAction>,
    /// Optional observation returned by the tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<Value>,
    /// Context window of prior thoughts, rendered as `"{position}:{thought}"`.
    #[serde(default)]
    pub trace: Vec<String>,
}

impl ReasoningStep {
    /// Create a new step with just a thought
    pub fn new(thought: impl Into<String>) -> Self {
        Self {
            thought: thought.into(),
            action: None,
            observation: None,
            trace: Vec::new(),
        }
    }

    /// Attach a tool action
    pub fn with_action(mut self, tool: impl Into<String>, input: Value) -> Self {
        self.action = Some(StepAction {
            tool: tool.into(),
            input,
        });
        self
    }

    /// Attach an observation
    pub fn with_observation(mut self, observation: Value) -> Self {
        self.observation = Some(observation);
        self
    }

    /// Attach the context trace window
    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.trace = trace;
        self
    }
}

/// Result of a reasoning run.
///
/// `success` is true iff a final answer was extracted before the iteration
/// cap or an abort occurred; a successful result always carries a non-empty
/// `final_answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningResult {
    /// The extracted final answer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    /// The ordered reasoning path accumulated during the run.
    pub path: Vec<ReasoningStep>,
    /// Whether a final answer was reached.
    pub success: bool,
}

impl ReasoningResult {
    /// A successful result carrying an answer and the path that produced it
    pub fn answered(final_answer: impl Into<String>, path: Vec<ReasoningStep>) -> Self {
        Self {
            final_answer: Some(final_answer.into()),
            path,
            success: true,
        }
    }

    /// A failed result carrying whatever path was accumulated
    pub fn unanswered(path: Vec<ReasoningStep>) -> Self {
        Self {
            final_answer: None,
            path,
            success: false,
        }
    }
}

/// A single step in a Program-of-Thought execution trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramStep {
    /// Variable name bound by this step (`x0`, `x1`, ...).
    pub variable: String,
    /// Operation performed (`parse`, `add`, `multiply`).
    pub operation: String,
    /// Value produced by the step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Names of prior variables this step depends on. The order of the
    /// produced step sequence is the dependency order.
    #[serde(default)]
    pub deps: Vec<String>,
}

/// A recorded Reflexion episode: a failed attempt, the feedback it drew,
/// and the rewritten attempt derived from that feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflexionEpisode {
    /// Unique episode id, usable as a memory-store key.
    pub id: String,
    /// The original attempt.
    pub attempt: Vec<ReasoningStep>,
    /// The feedback that triggered the reflection.
    pub feedback: String,
    /// The composed reflection text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    /// The rewritten attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_attempt: Option<Vec<ReasoningStep>>,
    /// When the episode was recorded.
    pub created_at: DateTime<Utc>,
}

impl ReflexionEpisode {
    /// Create a new episode from an attempt and its feedback
    pub fn new(attempt: Vec<ReasoningStep>, feedback: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            attempt,
            feedback: feedback.into(),
            reflection: None,
            improved_attempt: None,
            created_at: Utc::now(),
        }
    }
}
