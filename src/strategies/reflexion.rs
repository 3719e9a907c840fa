//! Reflexion reasoning strategy - a single corrective pass.
//!
//! Turns critique into a rewritten final answer: the failed attempt is
//! copied, earlier thoughts are tagged as revisited, and the last thought is
//! replaced by a final-answer wrapping of the reflection. Episodes are
//! persisted through the external memory collaborator when one is
//! configured.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::steps::{ReasoningStep, ReflexionEpisode};

/// Reflection used when the caller supplies no feedback.
const NO_FEEDBACK_SENTINEL: &str = "Reflection: no feedback provided";

/// Prefix applied to composed reflections.
const REFLECTION_PREFIX: &str = "Reflection: ";

/// A stored reasoning pattern surfaced by the memory collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionPattern {
    /// Fraction of episodes matching this pattern that later succeeded.
    pub success_rate: f64,
    /// Human-readable description of the pattern.
    pub description: String,
}

/// External episodic memory for reflexion history.
///
/// Persistence internals (database, retention, indexing) live outside this
/// crate; the engine only stores episodes and consumes retrieved patterns.
#[async_trait]
pub trait ReflectionMemory: Send + Sync {
    /// Persist a full episode.
    async fn store_episode(&self, episode: &ReflexionEpisode) -> AppResult<()>;
    /// Retrieve prior patterns relevant to `query`.
    async fn retrieve_patterns(&self, query: &str) -> AppResult<Vec<ReflectionPattern>>;
}

/// Reflexion strategy engine.
pub struct ReflexionEngine {
    memory: Option<Arc<dyn ReflectionMemory>>,
}

impl ReflexionEngine {
    /// Create an engine without episodic memory
    pub fn new() -> Self {
        Self { memory: None }
    }

    /// Attach the external memory collaborator
    pub fn with_memory(mut self, memory: Arc<dyn ReflectionMemory>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Rewrite a failed attempt using the given feedback.
    ///
    /// The episode is persisted before returning when memory is configured;
    /// a store failure propagates rather than silently dropping history.
    pub async fn improve(
        &self,
        attempt: Vec<ReasoningStep>,
        feedback: &str,
    ) -> AppResult<ReflexionEpisode> {
        let reflection = compose_reflection(feedback);
        let improved = rewrite_attempt(&attempt, &reflection);
        debug!(
            attempt_len = attempt.len(),
            improved_len = improved.len(),
            "Composed reflexion rewrite"
        );

        let mut episode = ReflexionEpisode::new(attempt, feedback);
        episode.reflection = Some(reflection);
        episode.improved_attempt = Some(improved);

        if let Some(memory) = &self.memory {
            memory.store_episode(&episode).await?;
            debug!(episode_id = %episode.id, "Episode persisted");
        }

        info!(episode_id = %episode.id, "Reflexion pass completed");
        Ok(episode)
    }
}

impl Default for ReflexionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose the reflection string from raw feedback.
fn compose_reflection(feedback: &str) -> String {
    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        return NO_FEEDBACK_SENTINEL.to_string();
    }
    let mut chars = trimmed.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{}{}", REFLECTION_PREFIX, lowered)
}

/// Produce the improved attempt from the original and the reflection.
fn rewrite_attempt(attempt: &[ReasoningStep], reflection: &str) -> Vec<ReasoningStep> {
    let body = reflection
        .strip_prefix(REFLECTION_PREFIX)
        .unwrap_or(reflection);
    let conclusion = format!("final answer: {}", body);

    if attempt.is_empty() {
        return vec![ReasoningStep::new(conclusion)];
    }

    let last = attempt.len() - 1;
    attempt
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let mut rewritten = step.clone();
            if index == last {
                rewritten.thought = conclusion.clone();
            } else {
                rewritten.thought = format!("{} (revisited)", step.thought);
            }
            rewritten
        })
        .collect()
}
