//! The orchestrating use case: strategy selection, tool invocation,
//! confidence scoring, and consensus aggregation.
//!
//! [`ReasoningEngine::execute_with_reasoning`] is the single entry point.
//! Each strategy runs as an opaque call; the engine adds no concurrency of
//! its own beyond what the strategy performs (multi-agent fan-out is
//! delegated to the external orchestrator).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::{
    AgentDeliberator, AgentProfile, Consensus, Deliberation, MultiAgentOrchestrator,
};
use crate::config::{AgentsConfig, Config};
use crate::error::{AppResult, StrategyError};
use crate::events::{EventSink, NullEventSink, ReasoningEvent};
use crate::graph::ReasoningGraph;
use crate::steps::ReasoningStep;
use crate::strategies::{
    ProgramLimits, ProgramOfThought, ProgramOutput, ReactExecutor, ReflectionMemory,
    ReflexionEngine, ThoughtGenerator, ThoughtNode, ThoughtStatus, TotLimits, TreeOfThoughts,
};
use crate::tools::ToolExecutor;

/// Reasoning strategy selected per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasoningStrategy {
    /// Bounded thought→action→observation loop (default).
    React,
    /// Tree-of-Thoughts frontier search.
    Tot,
    /// Reflexion corrective pass.
    Reflexion,
    /// Program-of-Thought symbolic execution.
    Program,
    /// Multi-agent consensus deliberation.
    MultiAgent,
}

impl ReasoningStrategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningStrategy::React => "react",
            ReasoningStrategy::Tot => "tot",
            ReasoningStrategy::Reflexion => "reflexion",
            ReasoningStrategy::Program => "program",
            ReasoningStrategy::MultiAgent => "multi-agent",
        }
    }
}

impl Default for ReasoningStrategy {
    fn default() -> Self {
        ReasoningStrategy::React
    }
}

impl std::fmt::Display for ReasoningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(ReasoningStrategy::React),
            "tot" => Ok(ReasoningStrategy::Tot),
            "reflexion" => Ok(ReasoningStrategy::Reflexion),
            "program" => Ok(ReasoningStrategy::Program),
            "multi-agent" => Ok(ReasoningStrategy::MultiAgent),
            _ => Err(format!("Unknown reasoning strategy: {}", s)),
        }
    }
}

/// Per-call options for the orchestrator.
#[derive(Debug, Clone)]
pub struct ReasoningOptions {
    /// ReAct iteration cap (clamped to >= 1 at use).
    pub max_iterations: usize,
    /// Tree-of-Thoughts depth bound (clamped to 1..=10 at use).
    pub max_depth: usize,
    /// Tree-of-Thoughts beam width (clamped to 1..=6 at use).
    pub beam_width: usize,
    /// Program-of-Thought wall-clock budget in milliseconds.
    pub timeout_ms: u64,
    /// Feedback handed to the reflexion pass.
    pub feedback: Option<String>,
    /// Agent panel for multi-agent mode; empty uses the default panel.
    pub agents: Vec<AgentProfile>,
    /// Cooperative cancellation signal threaded through ReAct.
    pub cancel: CancellationToken,
}

impl Default for ReasoningOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            max_depth: 3,
            beam_width: 3,
            timeout_ms: 1000,
            feedback: None,
            agents: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }
}

impl ReasoningOptions {
    /// Seed the options from configuration limits
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_iterations: config.limits.max_iterations,
            max_depth: config.limits.max_depth,
            beam_width: config.limits.beam_width,
            timeout_ms: config.limits.program_timeout_ms,
            ..Self::default()
        }
    }

    /// Set the ReAct iteration cap (clamped to >= 1)
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Set the Tree-of-Thoughts depth bound (clamped to 1..=10)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.clamp(1, 10);
        self
    }

    /// Set the Tree-of-Thoughts beam width (clamped to 1..=6)
    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width.clamp(1, 6);
        self
    }

    /// Set the Program-of-Thought budget
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the reflexion feedback
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Set the agent panel
    pub fn with_agents(mut self, agents: Vec<AgentProfile>) -> Self {
        self.agents = agents;
        self
    }

    /// Set the cancellation token
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Outcome of a ReAct-mode call.
#[derive(Debug, Clone, Serialize)]
pub struct ReactOutcome {
    /// Output of the requested tool.
    pub result: Value,
    /// The reasoning path.
    pub path: Vec<ReasoningStep>,
    /// The extracted final answer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Graph derived from the path.
    pub reasoning_graph: ReasoningGraph,
    /// Whether a final answer was reached.
    pub success: bool,
}

/// Outcome of a Tree-of-Thoughts-mode call.
#[derive(Debug, Clone, Serialize)]
pub struct TotOutcome {
    /// Output of the requested tool.
    pub result: Value,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Path from the root to the returned node.
    pub thought_path: Vec<ThoughtNode>,
}

/// Outcome of a reflexion-mode call.
#[derive(Debug, Clone, Serialize)]
pub struct ReflexionOutcome {
    /// Output of the requested tool.
    pub result: Value,
    /// The improved reasoning path.
    pub path: Vec<ReasoningStep>,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// The composed reflection text.
    pub reflection: String,
}

/// Outcome of a program-mode call.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramOutcome {
    /// Output of the requested tool.
    pub result: Value,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// The executed program: steps, trace, and computed result.
    pub program: ProgramOutput,
}

/// Outcome of a multi-agent-mode call.
#[derive(Debug, Clone, Serialize)]
pub struct ConsensusOutcome {
    /// Output of the requested tool.
    pub result: Value,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// The aggregated consensus.
    pub consensus: Consensus,
}

/// Uniform outcome of `execute_with_reasoning`, tagged by mode.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode")]
pub enum ReasoningOutcome {
    /// ReAct-mode outcome.
    #[serde(rename = "react")]
    React(ReactOutcome),
    /// Tree-of-Thoughts-mode outcome.
    #[serde(rename = "tot")]
    Tot(TotOutcome),
    /// Reflexion-mode outcome.
    #[serde(rename = "reflexion")]
    Reflexion(ReflexionOutcome),
    /// Program-mode outcome.
    #[serde(rename = "program")]
    Program(ProgramOutcome),
    /// Multi-agent-mode outcome.
    #[serde(rename = "multi-agent")]
    Consensus(ConsensusOutcome),
}

impl ReasoningOutcome {
    /// Confidence of the outcome, uniformly in [0, 1]
    pub fn confidence(&self) -> f64 {
        match self {
            ReasoningOutcome::React(o) => o.confidence,
            ReasoningOutcome::Tot(o) => o.confidence,
            ReasoningOutcome::Reflexion(o) => o.confidence,
            ReasoningOutcome::Program(o) => o.confidence,
            ReasoningOutcome::Consensus(o) => o.confidence,
        }
    }

    /// The reasoning path, where the mode produces one
    pub fn path(&self) -> &[ReasoningStep] {
        match self {
            ReasoningOutcome::React(o) => &o.path,
            ReasoningOutcome::Reflexion(o) => &o.path,
            _ => &[],
        }
    }

    /// Output of the requested tool
    pub fn tool_result(&self) -> &Value {
        match self {
            ReasoningOutcome::React(o) => &o.result,
            ReasoningOutcome::Tot(o) => &o.result,
            ReasoningOutcome::Reflexion(o) => &o.result,
            ReasoningOutcome::Program(o) => &o.result,
            ReasoningOutcome::Consensus(o) => &o.result,
        }
    }
}

/// The orchestrating reasoning engine.
pub struct ReasoningEngine {
    tools: Arc<dyn ToolExecutor>,
    events: Arc<dyn EventSink>,
    generator: Option<Arc<dyn ThoughtGenerator>>,
    memory: Option<Arc<dyn ReflectionMemory>>,
    orchestrator: Option<Arc<dyn MultiAgentOrchestrator>>,
    agents_config: AgentsConfig,
}

impl ReasoningEngine {
    /// Create an engine around the injected tool executor
    pub fn new(tools: Arc<dyn ToolExecutor>) -> Self {
        Self {
            tools,
            events: Arc::new(NullEventSink),
            generator: None,
            memory: None,
            orchestrator: None,
            agents_config: AgentsConfig::default(),
        }
    }

    /// Attach an event sink
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Attach the Tree-of-Thoughts generator callbacks
    pub fn with_generator(mut self, generator: Arc<dyn ThoughtGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Attach the reflexion memory collaborator
    pub fn with_memory(mut self, memory: Arc<dyn ReflectionMemory>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Attach the multi-agent orchestrator
    pub fn with_orchestrator(mut self, orchestrator: Arc<dyn MultiAgentOrchestrator>) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    /// Configure the default agent panel
    pub fn with_agents_config(mut self, agents_config: AgentsConfig) -> Self {
        self.agents_config = agents_config;
        self
    }

    /// Execute `tool` and reason about its goal with the selected strategy.
    ///
    /// Internal strategy failures never crash the call silently: ReAct
    /// failures become part of the structured outcome, while hard failures
    /// (program timeout, missing collaborators, memory store errors) are
    /// raised with a descriptive message.
    pub async fn execute_with_reasoning(
        &self,
        tool: &str,
        input: Value,
        strategy: ReasoningStrategy,
        options: ReasoningOptions,
    ) -> AppResult<ReasoningOutcome> {
        let goal = goal_from_input(tool, &input);
        debug!(tool = %tool, strategy = %strategy, goal = %goal, "Reasoning call starting");

        // The requested tool runs once up front; a failure is recorded in
        // the outcome rather than failing the whole call
        let result = match self.tools.execute(tool, input).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %tool, error = %e, "Requested tool failed");
                json!({"error": e.to_string()})
            }
        };

        let outcome = match strategy {
            ReasoningStrategy::React => self.run_react(result, &goal, &options).await,
            ReasoningStrategy::Tot => self.run_tot(result, &goal, &options).await?,
            ReasoningStrategy::Reflexion => self.run_reflexion(result, &goal, &options).await?,
            ReasoningStrategy::Program => self.run_program(result, &goal, &options)?,
            ReasoningStrategy::MultiAgent => self.run_consensus(result, &goal, &options).await?,
        };

        info!(
            tool = %tool,
            strategy = %strategy,
            confidence = outcome.confidence(),
            "Reasoning call completed"
        );
        Ok(outcome)
    }

    async fn run_react(
        &self,
        result: Value,
        goal: &str,
        options: &ReasoningOptions,
    ) -> ReasoningOutcome {
        let executor = ReactExecutor::new(
            self.tools.clone(),
            self.events.clone(),
            options.max_iterations,
        );
        let run = executor.execute(goal, options.cancel.clone()).await;
        let reasoning_graph = ReasoningGraph::from_steps(&run.path);
        let confidence = if run.success {
            best_path_confidence(&reasoning_graph).unwrap_or(0.75)
        } else {
            0.3
        };

        ReasoningOutcome::React(ReactOutcome {
            result,
            path: run.path,
            final_answer: run.final_answer,
            confidence,
            reasoning_graph,
            success: run.success,
        })
    }

    async fn run_tot(
        &self,
        result: Value,
        goal: &str,
        options: &ReasoningOptions,
    ) -> AppResult<ReasoningOutcome> {
        let generator = self.generator.clone().ok_or_else(|| {
            StrategyError::Validation {
                field: "generator".to_string(),
                reason: "tot mode requires a configured thought generator".to_string(),
            }
        })?;

        let mut tot = TreeOfThoughts::new(generator);
        let limits = TotLimits::new(options.max_depth, options.beam_width);
        let node = tot.explore(goal, limits).await?;
        let thought_path = tot.extract_path(node.id);
        let confidence = if node.status == ThoughtStatus::Success {
            node.score.unwrap_or(0.8)
        } else {
            0.3
        };

        Ok(ReasoningOutcome::Tot(TotOutcome {
            result,
            confidence,
            thought_path,
        }))
    }

    async fn run_reflexion(
        &self,
        result: Value,
        goal: &str,
        options: &ReasoningOptions,
    ) -> AppResult<ReasoningOutcome> {
        let executor = ReactExecutor::new(
            self.tools.clone(),
            self.events.clone(),
            options.max_iterations,
        );
        let attempt = executor.execute(goal, options.cancel.clone()).await;
        let attempt_succeeded = attempt.success;

        let mut engine = ReflexionEngine::new();
        if let Some(memory) = &self.memory {
            engine = engine.with_memory(memory.clone());
        }
        let feedback = options.feedback.clone().unwrap_or_default();
        let episode = engine.improve(attempt.path, &feedback).await?;

        let reflection = episode.reflection.clone().unwrap_or_default();
        let path = episode.improved_attempt.clone().unwrap_or_default();
        let confidence = if attempt_succeeded { 0.75 } else { 0.55 };

        Ok(ReasoningOutcome::Reflexion(ReflexionOutcome {
            result,
            path,
            confidence,
            reflection,
        }))
    }

    fn run_program(
        &self,
        result: Value,
        goal: &str,
        options: &ReasoningOptions,
    ) -> AppResult<ReasoningOutcome> {
        let program = ProgramOfThought::new()
            .run(goal, ProgramLimits::with_timeout(options.timeout_ms))?;

        Ok(ReasoningOutcome::Program(ProgramOutcome {
            result,
            confidence: 0.95,
            program,
        }))
    }

    async fn run_consensus(
        &self,
        result: Value,
        goal: &str,
        options: &ReasoningOptions,
    ) -> AppResult<ReasoningOutcome> {
        let orchestrator = self.orchestrator.clone().ok_or_else(|| {
            StrategyError::Validation {
                field: "orchestrator".to_string(),
                reason: "multi-agent mode requires a configured orchestrator".to_string(),
            }
        })?;

        let agents = if options.agents.is_empty() {
            default_panel(&self.agents_config)
        } else {
            options.agents.clone()
        };
        let deliberator = ReactDeliberator {
            tools: self.tools.clone(),
            events: self.events.clone(),
            goal: goal.to_string(),
            max_iterations: self.agents_config.deliberation_iterations,
        };

        let consensus = orchestrator.reach_consensus(&agents, &deliberator).await?;
        let mut payload = json!({"consensus": consensus.outcome});
        if let Some(map) = payload.as_object_mut() {
            map.insert("goal".to_string(), json!(goal));
        }
        self.events
            .emit(ReasoningEvent::new("reasoning.consensus", payload));

        let confidence = if consensus.participants.is_empty() {
            0.3
        } else {
            let ratio = consensus.participants.len() as f64 / agents.len().max(1) as f64;
            (0.5 + 0.4 * ratio).clamp(0.0, 1.0)
        };

        Ok(ReasoningOutcome::Consensus(ConsensusOutcome {
            result,
            confidence,
            consensus,
        }))
    }
}

/// Deliberator backed by a bounded ReAct pass per agent.
struct ReactDeliberator {
    tools: Arc<dyn ToolExecutor>,
    events: Arc<dyn EventSink>,
    goal: String,
    max_iterations: usize,
}

#[async_trait]
impl AgentDeliberator for ReactDeliberator {
    async fn deliberate(&self, agent: &AgentProfile) -> AppResult<Deliberation> {
        let executor = ReactExecutor::new(
            self.tools.clone(),
            self.events.clone(),
            self.max_iterations,
        );
        let scoped_goal = format!("[{}] {}", agent.role, self.goal);
        let run = executor.execute(&scoped_goal, CancellationToken::new()).await;

        let proposal = match &run.final_answer {
            Some(answer) => answer.clone(),
            None => run
                .path
                .last()
                .map(|step| step.thought.clone())
                .unwrap_or_else(|| "no proposal".to_string()),
        };
        let confidence = if run.success { 0.8 } else { 0.4 };

        Ok(Deliberation {
            agent_id: agent.id.clone(),
            proposal,
            confidence,
            steps: run.path,
        })
    }
}

/// Mean node confidence along the graph's best path.
fn best_path_confidence(graph: &ReasoningGraph) -> Option<f64> {
    let path = graph.best_path();
    if path.is_empty() {
        return None;
    }
    let total: f64 = path
        .iter()
        .filter_map(|id| graph.node(*id))
        .map(|node| node.confidence)
        .sum();
    Some((total / path.len() as f64).clamp(0.0, 1.0))
}

/// Derive the reasoning goal from the tool input.
fn goal_from_input(tool: &str, input: &Value) -> String {
    for key in ["goal", "problem", "query"] {
        if let Some(goal) = input.get(key).and_then(Value::as_str) {
            if !goal.trim().is_empty() {
                return goal.to_string();
            }
        }
    }
    if let Some(goal) = input.as_str() {
        if !goal.trim().is_empty() {
            return goal.to_string();
        }
    }
    let rendered = format!("{}: {}", tool, input);
    rendered.chars().take(200).collect()
}

/// The default planner/critic/synthesizer panel.
fn default_panel(config: &AgentsConfig) -> Vec<AgentProfile> {
    vec![
        AgentProfile::new("agent-planner", "planner", &config.model)
            .with_capability("decompose"),
        AgentProfile::new("agent-critic", "critic", &config.model)
            .with_capability("challenge"),
        AgentProfile::new("agent-synthesizer", "synthesizer", &config.model)
            .with_capability("aggregate"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ReasoningStrategy tests
    // ========================================================================

    #[test]
    fn test_strategy_as_str() {
        assert_eq!(ReasoningStrategy::React.as_str(), "react");
        assert_eq!(ReasoningStrategy::Tot.as_str(), "tot");
        assert_eq!(ReasoningStrategy::Reflexion.as_str(), "reflexion");
        assert_eq!(ReasoningStrategy::Program.as_str(), "program");
        assert_eq!(ReasoningStrategy::MultiAgent.as_str(), "multi-agent");
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(format!("{}", ReasoningStrategy::React), "react");
        assert_eq!(format!("{}", ReasoningStrategy::MultiAgent), "multi-agent");
    }

    #[test]
    fn test_strategy_from_str_valid() {
        assert_eq!(
            "react".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::React
        );
        assert_eq!(
            "tot".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::Tot
        );
        assert_eq!(
            "reflexion".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::Reflexion
        );
        assert_eq!(
            "program".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::Program
        );
        assert_eq!(
            "multi-agent".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::MultiAgent
        );
    }

    #[test]
    fn test_strategy_from_str_case_insensitive() {
        assert_eq!(
            "REACT".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::React
        );
        assert_eq!(
            "ToT".parse::<ReasoningStrategy>().unwrap(),
            ReasoningStrategy::Tot
        );
    }

    #[test]
    fn test_strategy_from_str_invalid() {
        let result = "invalid".parse::<ReasoningStrategy>();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Unknown reasoning strategy: invalid");
    }

    #[test]
    fn test_strategy_default_is_react() {
        assert_eq!(ReasoningStrategy::default(), ReasoningStrategy::React);
    }

    // ========================================================================
    // ReasoningOptions tests
    // ========================================================================

    #[test]
    fn test_options_defaults() {
        let options = ReasoningOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.beam_width, 3);
        assert_eq!(options.timeout_ms, 1000);
        assert!(options.feedback.is_none());
        assert!(options.agents.is_empty());
    }

    #[test]
    fn test_options_clamp_on_set() {
        let options = ReasoningOptions::default()
            .with_max_iterations(0)
            .with_max_depth(50)
            .with_beam_width(50);
        assert_eq!(options.max_iterations, 1);
        assert_eq!(options.max_depth, 10);
        assert_eq!(options.beam_width, 6);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.limits.max_iterations = 7;
        config.limits.beam_width = 2;
        let options = ReasoningOptions::from_config(&config);
        assert_eq!(options.max_iterations, 7);
        assert_eq!(options.beam_width, 2);
    }

    #[test]
    fn test_options_builder_chain() {
        let options = ReasoningOptions::default()
            .with_timeout_ms(50)
            .with_feedback("tighten the scope")
            .with_agents(vec![AgentProfile::new("a", "planner", "m")]);
        assert_eq!(options.timeout_ms, 50);
        assert_eq!(options.feedback.as_deref(), Some("tighten the scope"));
        assert_eq!(options.agents.len(), 1);
    }

    // ========================================================================
    // goal_from_input tests
    // ========================================================================

    #[test]
    fn test_goal_prefers_goal_key() {
        let input = json!({"goal": "g", "problem": "p"});
        assert_eq!(goal_from_input("t", &input), "g");
    }

    #[test]
    fn test_goal_falls_back_through_keys() {
        assert_eq!(goal_from_input("t", &json!({"problem": "p"})), "p");
        assert_eq!(goal_from_input("t", &json!({"query": "q"})), "q");
    }

    #[test]
    fn test_goal_accepts_bare_string() {
        assert_eq!(goal_from_input("t", &json!("just this")), "just this");
    }

    #[test]
    fn test_goal_renders_tool_and_input_as_last_resort() {
        let goal = goal_from_input("probe.scan", &json!({"target": "srv"}));
        assert!(goal.starts_with("probe.scan: "));
        assert!(goal.contains("srv"));
    }

    #[test]
    fn test_goal_truncates_long_render() {
        let input = json!({"blob": "x".repeat(500)});
        let goal = goal_from_input("t", &input);
        assert_eq!(goal.chars().count(), 200);
    }

    #[test]
    fn test_goal_skips_empty_values() {
        let input = json!({"goal": "  ", "problem": "real"});
        assert_eq!(goal_from_input("t", &input), "real");
    }

    // ========================================================================
    // default_panel tests
    // ========================================================================

    #[test]
    fn test_default_panel_roles() {
        let panel = default_panel(&AgentsConfig::default());
        let roles: Vec<&str> = panel.iter().map(|a| a.role.as_str()).collect();
        assert_eq!(roles, vec!["planner", "critic", "synthesizer"]);
        assert!(panel.iter().all(|a| a.model == "reasoning-default-v1"));
    }

    // ========================================================================
    // best_path_confidence tests
    // ========================================================================

    #[test]
    fn test_best_path_confidence_empty_graph() {
        let graph = ReasoningGraph::default();
        assert!(best_path_confidence(&graph).is_none());
    }

    #[test]
    fn test_best_path_confidence_mean() {
        let steps = vec![ReasoningStep::new("final answer: done")];
        let graph = ReasoningGraph::from_steps(&steps);
        // question 0.6 + conclusion 0.9 over two nodes
        let confidence = best_path_confidence(&graph).unwrap();
        assert!((confidence - 0.75).abs() < 1e-9);
    }
}
