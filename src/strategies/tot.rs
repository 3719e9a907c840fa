//! Tree-of-Thoughts reasoning strategy - beam-pruned frontier search.
//!
//! Candidate thoughts are proposed per node, scored concurrently, ranked,
//! and only the top `beam_width` survive. A child scoring >= 0.8 (or whose
//! text carries the final-answer marker) ends the search immediately; its
//! remaining siblings are still registered. The early exit on the first
//! qualifying child is deliberate and must not be replaced by an exhaustive
//! sweep of the expansion.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::contains_marker;
use crate::error::{AppResult, StrategyError, StrategyResult};

/// Score at or above which a child is classified a success.
const SUCCESS_SCORE: f64 = 0.8;

/// Index of a node in the search arena.
///
/// Ids are dense and sequential; they stay valid until the next
/// [`TreeOfThoughts::explore`] call clears the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThoughtId(pub usize);

impl std::fmt::Display for ThoughtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a thought node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThoughtStatus {
    /// Created but not yet expanded.
    Pending,
    /// Expanded into children.
    Explored,
    /// Classified as a success (score or marker).
    Success,
    /// Exhausted without producing children.
    Failed,
}

/// A node in the thought tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtNode {
    /// Arena id of this node.
    pub id: ThoughtId,
    /// The proposed thought text.
    pub content: String,
    /// Promise score in [0, 1], if scored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Lifecycle state.
    pub status: ThoughtStatus,
    /// Parent node, absent for the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ThoughtId>,
    /// Child node ids in ranked creation order.
    #[serde(default)]
    pub children: Vec<ThoughtId>,
}

/// Search bounds for one exploration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotLimits {
    /// Maximum tree depth (1..=10).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Candidates kept per expansion (1..=6).
    #[serde(default = "default_beam_width")]
    pub beam_width: usize,
}

fn default_max_depth() -> usize {
    3
}

fn default_beam_width() -> usize {
    3
}

impl Default for TotLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            beam_width: default_beam_width(),
        }
    }
}

impl TotLimits {
    /// Create limits, clamping both bounds into their sane ranges
    pub fn new(max_depth: usize, beam_width: usize) -> Self {
        Self {
            max_depth: max_depth.clamp(1, 10),
            beam_width: beam_width.clamp(1, 6),
        }
    }

    fn clamped(&self) -> Self {
        Self::new(self.max_depth, self.beam_width)
    }
}

/// Proposal and scoring callbacks injected by the caller.
///
/// `propose` produces candidate continuations for a node's content;
/// `score` rates one idea's promise in [0, 1]. Both are typically backed by
/// a language model outside this crate.
#[async_trait]
pub trait ThoughtGenerator: Send + Sync {
    /// Propose candidate ideas continuing from `content`.
    async fn propose(&self, content: &str) -> StrategyResult<Vec<String>>;
    /// Score an idea's promise in [0, 1].
    async fn score(&self, idea: &str) -> StrategyResult<f64>;
}

/// Tree-of-Thoughts strategy executor.
pub struct TreeOfThoughts {
    generator: Arc<dyn ThoughtGenerator>,
    arena: Vec<ThoughtNode>,
}

impl TreeOfThoughts {
    /// Create an executor around the injected generator
    pub fn new(generator: Arc<dyn ThoughtGenerator>) -> Self {
        Self {
            generator,
            arena: Vec::new(),
        }
    }

    /// Explore from `problem`, returning the success node or the root on
    /// exhaustion. Nodes remain addressable via [`Self::node`] and
    /// [`Self::extract_path`] until the next call clears the arena.
    pub async fn explore(&mut self, problem: &str, limits: TotLimits) -> AppResult<ThoughtNode> {
        if problem.trim().is_empty() {
            return Err(StrategyError::Validation {
                field: "problem".to_string(),
                reason: "Problem cannot be empty".to_string(),
            }
            .into());
        }

        let limits = limits.clamped();
        debug!(
            problem = %problem,
            max_depth = limits.max_depth,
            beam_width = limits.beam_width,
            "Tree-of-Thoughts exploration starting"
        );

        self.arena.clear();
        let root = self.alloc(problem.to_string(), None, None);
        let mut frontier: VecDeque<(ThoughtId, usize)> = VecDeque::new();
        frontier.push_back((root, 0));

        let mut expansions = 0usize;
        while let Some((node_id, depth)) = frontier.pop_front() {
            if depth >= limits.max_depth {
                if self.arena[node_id.0].children.is_empty() {
                    self.arena[node_id.0].status = ThoughtStatus::Failed;
                }
                continue;
            }

            let content = self.arena[node_id.0].content.clone();
            let ideas = self.generator.propose(&content).await?;
            if ideas.is_empty() {
                continue;
            }
            expansions += 1;

            let scores = try_join_all(ideas.iter().map(|idea| self.generator.score(idea))).await?;

            // Stable descending rank keeps the original proposal order on ties
            let mut ranked: Vec<(String, f64)> = ideas
                .into_iter()
                .zip(scores.into_iter().map(|s| s.clamp(0.0, 1.0)))
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            ranked.truncate(limits.beam_width);

            self.arena[node_id.0].status = ThoughtStatus::Explored;

            let mut winner: Option<ThoughtId> = None;
            let mut created: Vec<ThoughtId> = Vec::with_capacity(ranked.len());
            for (idea, score) in ranked {
                let status = if score >= SUCCESS_SCORE || contains_marker(&idea) {
                    ThoughtStatus::Success
                } else {
                    ThoughtStatus::Pending
                };
                let child = self.alloc(idea, Some(score), Some(node_id));
                self.arena[child.0].status = status;
                self.arena[node_id.0].children.push(child);
                created.push(child);
                if winner.is_none() && status == ThoughtStatus::Success {
                    winner = Some(child);
                }
            }

            if let Some(success) = winner {
                info!(
                    node = %success,
                    depth = depth + 1,
                    expansions = expansions,
                    "Tree-of-Thoughts found a success node"
                );
                return Ok(self.arena[success.0].clone());
            }

            for child in created {
                frontier.push_back((child, depth + 1));
            }
        }

        if self.arena[root.0].children.is_empty() {
            self.arena[root.0].status = ThoughtStatus::Failed;
        }
        info!(expansions = expansions, "Tree-of-Thoughts frontier exhausted");
        Ok(self.arena[root.0].clone())
    }

    /// Walk `parent_id` backlinks, producing the path root→…→node
    pub fn extract_path(&self, id: ThoughtId) -> Vec<ThoughtNode> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.arena.get(current.0) else {
                break;
            };
            path.push(node.clone());
            cursor = node.parent_id;
        }
        path.reverse();
        path
    }

    /// Look up a node registered by the most recent exploration
    pub fn node(&self, id: ThoughtId) -> Option<&ThoughtNode> {
        self.arena.get(id.0)
    }

    /// Number of nodes registered by the most recent exploration
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    fn alloc(
        &mut self,
        content: String,
        score: Option<f64>,
        parent_id: Option<ThoughtId>,
    ) -> ThoughtId {
        let id = ThoughtId(self.arena.len());
        self.arena.push(ThoughtNode {
            id,
            content,
            score,
            status: ThoughtStatus::Pending,
            parent_id,
            children: Vec::new(),
        });
        id
    }
}
