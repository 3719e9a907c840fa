//! Multi-agent consensus seams.
//!
//! The engine hands an agent panel and a deliberation callback to an
//! external [`MultiAgentOrchestrator`], which fans deliberation out across
//! agents (optionally gating proposals through its own thought validator —
//! that policy gate is opaque to this crate) and returns the aggregated
//! consensus.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::steps::ReasoningStep;

/// Description of one deliberating agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Unique agent id.
    pub id: String,
    /// Role played in the panel (planner, critic, ...).
    pub role: String,
    /// Capabilities the agent brings.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Model identifier backing the agent.
    pub model: String,
}

impl AgentProfile {
    /// Create a profile
    pub fn new(
        id: impl Into<String>,
        role: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            capabilities: Vec::new(),
            model: model.into(),
        }
    }

    /// Add a capability
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }
}

/// One agent's contribution to the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deliberation {
    /// The contributing agent.
    pub agent_id: String,
    /// The agent's proposal.
    pub proposal: String,
    /// Confidence in the proposal (0.0-1.0).
    pub confidence: f64,
    /// Reasoning steps behind the proposal.
    #[serde(default)]
    pub steps: Vec<ReasoningStep>,
}

/// The aggregated result of a deliberation round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consensus {
    /// The agreed outcome.
    pub outcome: String,
    /// Agents whose contributions shaped the outcome.
    pub participants: Vec<String>,
}

/// Produces one agent's deliberation for the current goal.
///
/// The engine supplies an implementation backed by a bounded ReAct pass;
/// orchestrators call it once per agent, typically concurrently.
#[async_trait]
pub trait AgentDeliberator: Send + Sync {
    /// Deliberate on behalf of `agent`.
    async fn deliberate(&self, agent: &AgentProfile) -> AppResult<Deliberation>;
}

/// External consensus orchestrator.
///
/// Implementations own the fan-out, any proposal validation, and the
/// aggregation policy; this crate only consumes the resulting consensus.
#[async_trait]
pub trait MultiAgentOrchestrator: Send + Sync {
    /// Run a deliberation round over `agents` and aggregate a consensus.
    async fn reach_consensus(
        &self,
        agents: &[AgentProfile],
        deliberator: &dyn AgentDeliberator,
    ) -> AppResult<Consensus>;
}
