use crate::state_machine::{StateClass, StateId, Transition};
use petgraph::Direction;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use std::collections::HashMap;
use std::fmt;

/// A directed, labeled transition graph describing the legal operation sequences of a
/// stateful API.
///
/// Holds at most one [`Transition`] per ordered (source, target) pair. States and
/// transitions keep their insertion order, which is also the order used by the
/// canonical text form and by every search in this crate.
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    /// The underlying graph structure.
    /// Nodes are state identifiers, edges the labeled transitions between them.
    pub graph: StableGraph<StateId, Transition>,

    /// A lookup table mapping state identifiers to their internal graph indices.
    ///
    /// Ensures each state is represented by exactly one node and gives constant time
    /// lookup when linking transitions during ingestion.
    pub state_index: HashMap<StateId, NodeIndex>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a state exists, returning its node index.
    pub fn add_state(&mut self, state: impl Into<StateId>) -> NodeIndex {
        let state = state.into();
        if let Some(&idx) = self.state_index.get(&state) {
            return idx;
        }
        let node_index = self.graph.add_node(state.clone());
        self.state_index.insert(state, node_index);
        node_index
    }

    /// Adds a transition, creating its endpoint states if needed.
    ///
    /// When the pair is already linked, labels not yet present on the existing
    /// transition are appended to it instead of adding a parallel edge.
    pub fn add_transition(&mut self, transition: Transition) -> EdgeIndex {
        let from_idx = self.add_state(transition.from_state().clone());
        let to_idx = self.add_state(transition.to_state().clone());

        if let Some(edge_idx) = self.graph.find_edge(from_idx, to_idx) {
            if let Some(existing) = self.graph.edge_weight_mut(edge_idx) {
                for label in transition.labels() {
                    if !existing.has_label(label) {
                        existing.add_label(label.clone());
                    }
                }
            }
            edge_idx
        } else {
            self.graph.add_edge(from_idx, to_idx, transition)
        }
    }

    /// Adds a single label between two states, merging onto an existing transition.
    pub fn add_labeled_transition(
        &mut self,
        from_state: impl Into<StateId>,
        to_state: impl Into<StateId>,
        label: impl Into<String>,
    ) -> EdgeIndex {
        self.add_transition(Transition::labeled(from_state, to_state, label))
    }

    pub fn node_index(&self, state_id: &str) -> Option<NodeIndex> {
        self.state_index.get(state_id).copied()
    }

    pub fn contains_state(&self, state_id: &str) -> bool {
        self.state_index.contains_key(state_id)
    }

    /// All states, in insertion order
    pub fn states(&self) -> impl Iterator<Item = &StateId> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
    }

    /// All transitions, in insertion order
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.graph
            .edge_indices()
            .filter_map(|idx| self.graph.edge_weight(idx))
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The transition linking `from` to `to`, if any
    pub fn transition_between(&self, from: &str, to: &str) -> Option<&Transition> {
        let edge_idx = self.graph.find_edge(self.node_index(from)?, self.node_index(to)?)?;
        self.graph.edge_weight(edge_idx)
    }

    /// First transition (in insertion order) carrying `label`
    pub fn find_transition_by_label(&self, label: &str) -> Option<&Transition> {
        self.transitions().find(|t| t.has_label(label))
    }

    /// Get outgoing transitions from a state, in insertion order
    pub fn outgoing_transitions(&self, state_id: &str) -> Vec<&Transition> {
        self.node_index(state_id)
            .map(|idx| {
                self.successors(idx)
                    .into_iter()
                    .filter_map(|(edge, _)| self.graph.edge_weight(edge))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Self-loop transitions, in insertion order
    pub fn self_loops(&self) -> impl Iterator<Item = &Transition> {
        self.transitions().filter(|t| t.is_self_loop())
    }

    /// Outgoing edges of a node paired with their target, sorted by insertion order.
    ///
    /// petgraph walks adjacency lists newest-first; searches rely on this order instead.
    pub(crate) fn successors(&self, node: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        out.sort_by_key(|(edge, _)| *edge);
        out
    }

    /// Resolve a walk of edge indices into owned transitions.
    pub(crate) fn walk_transitions(&self, walk: &[EdgeIndex]) -> Vec<Transition> {
        walk.iter()
            .filter_map(|&edge| self.graph.edge_weight(edge))
            .cloned()
            .collect()
    }

    /// Classify a state by its position in the graph
    pub fn classify_state(&self, state_id: &str, error_state: &str) -> StateClass {
        if state_id == error_state {
            return StateClass::Error;
        }
        let Some(node_idx) = self.node_index(state_id) else {
            return StateClass::Unknown;
        };
        let has_incoming = self
            .graph
            .edges_directed(node_idx, Direction::Incoming)
            .any(|edge| edge.source() != node_idx);
        let has_outgoing = self
            .graph
            .edges_directed(node_idx, Direction::Outgoing)
            .any(|edge| edge.target() != node_idx);
        StateClass::from_degrees(has_incoming, has_outgoing)
    }

    /// Find all initial states (no incoming edges from other states)
    pub fn find_initial_states(&self, error_state: &str) -> Vec<&StateId> {
        self.states()
            .filter(|s| self.classify_state(s, error_state) == StateClass::Initial)
            .collect()
    }

    /// Find all terminal states (no outgoing edges to other states)
    pub fn find_terminal_states(&self, error_state: &str) -> Vec<&StateId> {
        self.states()
            .filter(|s| self.classify_state(s, error_state) == StateClass::Terminal)
            .collect()
    }

    /// Export to DOT format for Graphviz.
    ///
    /// Every label gets its own `"src" -> "tgt" [ label="L" ];` line, so the output
    /// can be ingested again by [`crate::parser::DotParser`].
    pub fn to_dot(&self, error_state: &str) -> String {
        let mut dot = "digraph StateGraph {\n".to_string();
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=filled];\n\n");

        for state in self.states() {
            let color = self.classify_state(state, error_state).color();
            dot.push_str(&format!("  \"{}\" [fillcolor=\"{}\"];\n", state, color));
        }

        dot.push('\n');

        for transition in self.transitions() {
            for label in transition.labels() {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\" [ label=\"{}\" ];\n",
                    transition.from_state(),
                    transition.to_state(),
                    label
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// Canonical text form: `([v1, v2, ...], [label=(src,tgt), ...])` in insertion order.
impl fmt::Display for StateGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<&str> = self.states().map(String::as_str).collect();
        let transitions: Vec<String> = self
            .transitions()
            .map(|t| format!("{}=({},{})", t, t.from_state(), t.to_state()))
            .collect();
        write!(f, "([{}], [{}])", states.join(", "), transitions.join(", "))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a graph from `(source, target, label)` triples
    pub(crate) fn graph(edges: &[(&str, &str, &str)]) -> StateGraph {
        let mut graph = StateGraph::new();
        for (from, to, label) in edges {
            graph.add_labeled_transition(*from, *to, *label);
        }
        graph
    }

    /// C-style pointer typestate: valid / dangling / null
    pub(crate) fn pointer_model() -> StateGraph {
        graph(&[
            ("valid", "dangle", "free"),
            ("valid", "null", "assign_null"),
            ("dangle", "valid", "malloc"),
            ("dangle", "null", "assign_null"),
            ("dangle", "err", "deref"),
            ("null", "valid", "malloc"),
            ("null", "err", "deref"),
        ])
    }

    #[test]
    fn test_empty_graph() {
        let graph = StateGraph::new();
        assert_eq!(graph.state_count(), 0);
        assert_eq!(graph.transition_count(), 0);
        assert_eq!(graph.to_string(), "([], [])");
    }

    #[test]
    fn test_add_state_is_idempotent() {
        let mut graph = StateGraph::new();
        let a = graph.add_state("A");
        assert_eq!(graph.add_state("A"), a);
        assert_eq!(graph.state_count(), 1);
    }

    #[test]
    fn test_labels_merge_on_same_pair() {
        let mut graph = graph(&[("A", "B", "open"), ("B", "A", "close")]);
        let first = graph.add_labeled_transition("A", "B", "reopen");
        let again = graph.add_labeled_transition("A", "B", "open");
        assert_eq!(first, again);

        assert_eq!(graph.transition_count(), 2);
        let merged = graph.transition_between("A", "B").unwrap();
        assert_eq!(merged.labels(), ["open", "reopen"]);
        assert_eq!(graph.to_string(), "([A, B], [[open, reopen]=(A,B), close=(B,A)])");
    }

    #[test]
    fn test_canonical_text_in_insertion_order() {
        let graph = graph(&[("A", "B", "x"), ("B", "err", "y"), ("B", "B", "z")]);
        assert_eq!(
            graph.to_string(),
            "([A, B, err], [x=(A,B), y=(B,err), z=(B,B)])"
        );
    }

    #[test]
    fn test_classification() {
        let graph = graph(&[("A", "B", "x"), ("B", "err", "y"), ("B", "B", "z"), ("C", "C", "w")]);
        assert_eq!(graph.classify_state("A", "err"), StateClass::Initial);
        assert_eq!(graph.classify_state("B", "err"), StateClass::Active);
        assert_eq!(graph.classify_state("err", "err"), StateClass::Error);
        assert_eq!(graph.classify_state("C", "err"), StateClass::Initial);
        assert_eq!(graph.classify_state("missing", "err"), StateClass::Unknown);

        assert_eq!(graph.self_loops().count(), 2);
        assert_eq!(graph.find_initial_states("err"), ["A", "C"]);
        assert!(graph.find_terminal_states("err").is_empty());
    }

    #[test]
    fn test_outgoing_in_insertion_order() {
        let graph = graph(&[("A", "B", "x"), ("A", "C", "y"), ("A", "A", "z")]);
        let labels: Vec<String> = graph
            .outgoing_transitions("A")
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(labels, ["x", "y", "z"]);
        assert!(graph.outgoing_transitions("missing").is_empty());
    }

    #[test]
    fn test_to_dot_output() {
        let mut graph = graph(&[("A", "B", "x"), ("B", "err", "y")]);
        graph.add_labeled_transition("A", "B", "x2");

        let dot = graph.to_dot("err");
        assert!(dot.contains("digraph StateGraph"));
        assert!(dot.contains("\"A\" [fillcolor=\"lightblue\"];"));
        assert!(dot.contains("\"err\" [fillcolor=\"red\"];"));
        assert!(dot.contains("\"A\" -> \"B\" [ label=\"x\" ];"));
        assert!(dot.contains("\"A\" -> \"B\" [ label=\"x2\" ];"));
    }
}
