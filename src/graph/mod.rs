//! Reasoning graph derived from a ReAct-shaped step sequence.
//!
//! Each step contributes a chain of question → tool_call → observation →
//! conclusion nodes; the graph is a DAG by construction but is still
//! verified acyclic before scoring. Traversals use explicit stacks so
//! pathologically long reasoning chains cannot overflow the call stack.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::steps::ReasoningStep;

/// Confidence assigned to question nodes.
const QUESTION_CONFIDENCE: f64 = 0.6;
/// Confidence assigned to tool_call nodes.
const TOOL_CALL_CONFIDENCE: f64 = 0.55;
/// Confidence assigned to observation nodes.
const OBSERVATION_CONFIDENCE: f64 = 0.65;
/// Confidence assigned to conclusion nodes.
const CONCLUSION_CONFIDENCE: f64 = 0.9;

/// Maximum characters kept from a serialized observation.
const OBSERVATION_PREVIEW_CHARS: usize = 120;

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphNodeId(pub usize);

impl std::fmt::Display for GraphNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a node plays in the reasoning graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// An internal thought.
    Question,
    /// A tool invocation.
    ToolCall,
    /// A tool observation.
    Observation,
    /// An extracted final answer.
    Conclusion,
}

/// A node in the reasoning graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningNode {
    /// Arena id of this node.
    pub id: GraphNodeId,
    /// Node role.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Rendered content.
    pub content: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Forward edges in traversal order.
    #[serde(default)]
    pub edges: Vec<GraphNodeId>,
}

/// An arena-backed reasoning graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningGraph {
    /// All nodes; a node's id is its index.
    pub nodes: Vec<ReasoningNode>,
}

impl ReasoningGraph {
    /// Build the graph from a sequence of reasoning steps.
    ///
    /// Missing action/observation fields simply skip the corresponding node
    /// type; there is no validation failure path.
    pub fn from_steps(steps: &[ReasoningStep]) -> Self {
        let mut graph = ReasoningGraph::default();
        let mut tail: Option<GraphNodeId> = None;

        for step in steps {
            let question = graph.push_node(
                NodeKind::Question,
                step.thought.clone(),
                QUESTION_CONFIDENCE,
            );
            graph.link(tail, question);
            tail = Some(question);

            if let Some(action) = &step.action {
                let node = graph.push_node(
                    NodeKind::ToolCall,
                    action.tool.clone(),
                    TOOL_CALL_CONFIDENCE,
                );
                graph.link(tail, node);
                tail = Some(node);
            }

            if let Some(observation) = &step.observation {
                let node = graph.push_node(
                    NodeKind::Observation,
                    render_observation(observation),
                    OBSERVATION_CONFIDENCE,
                );
                graph.link(tail, node);
                tail = Some(node);
            }

            if crate::strategies::contains_marker(&step.thought) {
                let node = graph.push_node(
                    NodeKind::Conclusion,
                    conclusion_text(&step.thought),
                    CONCLUSION_CONFIDENCE,
                );
                graph.link(tail, node);
                tail = Some(node);
            }
        }

        graph
    }

    /// Detect cycles with an iterative three-color depth-first traversal.
    ///
    /// Terminates on graphs with shared-but-acyclic fan-in; edges pointing
    /// outside the arena are ignored.
    pub fn has_cycles(&self) -> bool {
        const UNVISITED: u8 = 0;
        const VISITING: u8 = 1;
        const VISITED: u8 = 2;

        let count = self.nodes.len();
        let mut color = vec![UNVISITED; count];

        for start in 0..count {
            if color[start] != UNVISITED {
                continue;
            }
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            color[start] = VISITING;

            while let Some(&mut (node, ref mut edge_index)) = stack.last_mut() {
                let edges = &self.nodes[node].edges;
                if *edge_index < edges.len() {
                    let target = edges[*edge_index].0;
                    *edge_index += 1;
                    if target >= count {
                        continue;
                    }
                    match color[target] {
                        UNVISITED => {
                            color[target] = VISITING;
                            stack.push((target, 0));
                        }
                        VISITING => return true,
                        _ => {}
                    }
                } else {
                    color[node] = VISITED;
                    stack.pop();
                }
            }
        }
        false
    }

    /// Find the root-to-leaf path with the greatest total confidence.
    ///
    /// Roots are nodes with zero in-degree; leaves have no in-range
    /// outgoing edges. The first path found wins ties. Returns an empty
    /// sequence when the graph has no roots.
    pub fn best_path(&self) -> Vec<GraphNodeId> {
        let count = self.nodes.len();
        let mut in_degree = vec![0usize; count];
        for node in &self.nodes {
            for edge in &node.edges {
                if edge.0 < count {
                    in_degree[edge.0] += 1;
                }
            }
        }

        let mut best: Vec<usize> = Vec::new();
        let mut best_total = f64::NEG_INFINITY;

        for root in (0..count).filter(|&i| in_degree[i] == 0) {
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            let mut on_path = vec![false; count];
            on_path[root] = true;
            let mut total = self.nodes[root].confidence;

            while let Some(&(node, edge_index)) = stack.last() {
                if edge_index == 0 && self.leaf(node) {
                    if total > best_total {
                        best_total = total;
                        best = stack.iter().map(|&(n, _)| n).collect();
                    }
                }

                // Advance to the next unvisited in-range edge, if any
                let edges = &self.nodes[node].edges;
                let mut next: Option<usize> = None;
                let mut cursor = edge_index;
                while cursor < edges.len() {
                    let target = edges[cursor].0;
                    cursor += 1;
                    if target < count && !on_path[target] {
                        next = Some(target);
                        break;
                    }
                }

                stack.last_mut().expect("frame exists").1 = cursor;
                match next {
                    Some(target) => {
                        on_path[target] = true;
                        total += self.nodes[target].confidence;
                        stack.push((target, 0));
                    }
                    None => {
                        on_path[node] = false;
                        total -= self.nodes[node].confidence;
                        stack.pop();
                    }
                }
            }
        }

        best.into_iter().map(GraphNodeId).collect()
    }

    /// Look up a node by id
    pub fn node(&self, id: GraphNodeId) -> Option<&ReasoningNode> {
        self.nodes.get(id.0)
    }

    /// True when the node has no in-range outgoing edges
    fn leaf(&self, node: usize) -> bool {
        !self.nodes[node]
            .edges
            .iter()
            .any(|edge| edge.0 < self.nodes.len())
    }

    fn push_node(&mut self, kind: NodeKind, content: String, confidence: f64) -> GraphNodeId {
        let id = GraphNodeId(self.nodes.len());
        self.nodes.push(ReasoningNode {
            id,
            kind,
            content,
            confidence,
            edges: Vec::new(),
        });
        id
    }

    fn link(&mut self, from: Option<GraphNodeId>, to: GraphNodeId) {
        if let Some(from) = from {
            self.nodes[from.0].edges.push(to);
        }
    }
}

/// Render an observation value for a graph node.
fn render_observation(observation: &Value) -> String {
    match observation {
        Value::Null => "unknown".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => match serde_json::to_string(other) {
            Ok(serialized) => truncate_chars(&serialized, OBSERVATION_PREVIEW_CHARS),
            Err(_) => "unserializable".to_string(),
        },
    }
}

/// Content for a conclusion node: the text after the final-answer marker.
fn conclusion_text(thought: &str) -> String {
    if let Some(answer) = crate::strategies::answer_after_marker(thought) {
        return answer;
    }
    // Marker without a colon: take the remainder after the marker itself
    crate::strategies::strip_answer_marker(thought)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
