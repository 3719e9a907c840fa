//! # MCP Reasoning Engine
//!
//! The multi-strategy reasoning core of an MCP-protocol diagnostic toolkit.
//! Strategies reason about a goal by invoking injected tool callbacks and
//! compose their findings into one uniform outcome with consistent
//! confidence semantics.
//!
//! ## Features
//!
//! - **ReAct**: bounded thought→action→observation loop with cooperative
//!   cancellation
//! - **Tree-of-Thoughts**: beam-pruned frontier search with concurrent
//!   candidate scoring
//! - **Reflexion**: single corrective pass that turns feedback into a
//!   rewritten final answer, optionally persisted to episodic memory
//! - **Program-of-Thought**: deterministic, auditable arithmetic execution
//!   traces
//! - **Reasoning Graph**: question/tool_call/observation/conclusion DAG with
//!   cycle detection and weighted best-path scoring
//! - **Multi-Agent Consensus**: panel deliberation delegated to an external
//!   orchestrator
//!
//! ## Architecture
//!
//! ```text
//! Caller → ReasoningEngine → Strategy (ReAct | ToT | Reflexion | PoT)
//!              ↓                   ↓
//!        Event Sink          Tool Executor (injected)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mcp_reasoning_engine::{
//!     ReasoningEngine, ReasoningOptions, ReasoningStrategy,
//! };
//! use mcp_reasoning_engine::tools::FnToolExecutor;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tools = Arc::new(FnToolExecutor::new(|_tool, _input| {
//!         Ok(json!({"done": true, "value": "final answer: healthy"}))
//!     }));
//!     let engine = ReasoningEngine::new(tools);
//!     let outcome = engine
//!         .execute_with_reasoning(
//!             "probe.health",
//!             json!({"goal": "diagnose the handshake failure"}),
//!             ReasoningStrategy::React,
//!             ReasoningOptions::default(),
//!         )
//!         .await?;
//!     println!("confidence: {}", outcome.confidence());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Multi-agent consensus seams and records.
pub mod agents;
/// Configuration management for reasoning limits and logging.
pub mod config;
/// The orchestrating engine and its outcome types.
pub mod engine;
/// Error types and result aliases for the crate.
pub mod error;
/// Lifecycle events and emission sinks.
pub mod events;
/// Reasoning graph construction and scoring.
pub mod graph;
/// Shared step and result records.
pub mod steps;
/// Reasoning strategy implementations (ReAct, ToT, Reflexion, PoT).
pub mod strategies;
/// The tool-execution seam.
pub mod tools;

pub use config::Config;
pub use engine::{ReasoningEngine, ReasoningOptions, ReasoningOutcome, ReasoningStrategy};
pub use error::{AppError, AppResult};
