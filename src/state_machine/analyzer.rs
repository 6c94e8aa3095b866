//! Model shape analyzer
//!
//! Summarises a typestate model before enumerating it: overall shape, degree
//! classification and which states can reach the error state.

use super::{StateGraph, StateId};
use petgraph::Direction;
use petgraph::visit::{Bfs, Reversed};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelShape {
    /// A -> B -> C -> D
    Linear,

    /// A -> B
    ///   -> C
    Tree,

    /// A -> B -> A, or any self-loop
    Cyclic,

    /// Empty model
    Unknown,
}

impl ModelShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelShape::Linear => "Linear",
            ModelShape::Tree => "Branching",
            ModelShape::Cyclic => "Cyclic",
            ModelShape::Unknown => "Empty/Unknown",
        }
    }
}

/// Analysis report containing shape and metrics
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub shape: ModelShape,
    pub states: usize,
    pub transitions: usize,
    pub self_loops: usize,
    pub branching_factor: f64,
    pub initial_states: Vec<StateId>,
    pub terminal_states: Vec<StateId>,
    pub error_state: StateId,
    pub has_error_state: bool,
    /// States (other than the error state) with at least one path into it
    pub reaches_error: Vec<StateId>,
}

/// Analyze a model relative to its error state
pub fn analyze(graph: &StateGraph, error_state: &str) -> AnalysisReport {
    let node_count = graph.state_count();
    let has_cycles = petgraph::algo::is_cyclic_directed(&graph.graph);

    let out_degrees: Vec<usize> = graph
        .graph
        .node_indices()
        .map(|idx| graph.graph.edges_directed(idx, Direction::Outgoing).count())
        .collect();
    let branching_factor = if node_count > 0 {
        out_degrees.iter().sum::<usize>() as f64 / node_count as f64
    } else {
        0.0
    };

    let shape = if node_count == 0 {
        ModelShape::Unknown
    } else if has_cycles {
        ModelShape::Cyclic
    } else if out_degrees.iter().all(|&d| d <= 1) {
        ModelShape::Linear
    } else {
        ModelShape::Tree
    };

    let mut reaches_error = Vec::new();
    if let Some(err_idx) = graph.node_index(error_state) {
        let reversed = Reversed(&graph.graph);
        let mut bfs = Bfs::new(reversed, err_idx);
        while let Some(idx) = bfs.next(reversed) {
            if idx != err_idx
                && let Some(state) = graph.graph.node_weight(idx)
            {
                reaches_error.push(state.clone());
            }
        }
    }

    AnalysisReport {
        shape,
        states: node_count,
        transitions: graph.transition_count(),
        self_loops: graph.self_loops().count(),
        branching_factor,
        initial_states: graph
            .find_initial_states(error_state)
            .into_iter()
            .cloned()
            .collect(),
        terminal_states: graph
            .find_terminal_states(error_state)
            .into_iter()
            .cloned()
            .collect(),
        error_state: error_state.to_string(),
        has_error_state: graph.contains_state(error_state),
        reaches_error,
    }
}
