//! Paths through a state graph, and their conversion to standalone graphs

use crate::state_machine::{StateGraph, StateId, Transition};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// An ordered, non-empty sequence of transitions where each transition starts where
/// the previous one ended.
///
/// The adjacency invariant is checked once at construction; a `Path` is immutable
/// afterwards. Equality, ordering and hashing are structural over the transition list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Path {
    transitions: Vec<Transition>,
}

impl Path {
    pub fn new(transitions: Vec<Transition>) -> Result<Self> {
        if transitions.is_empty() {
            return Err(Error::contract("a path needs at least one transition"));
        }
        if let Some(pos) = transitions
            .windows(2)
            .position(|pair| pair[0].to_state() != pair[1].from_state())
        {
            return Err(Error::contract(format!(
                "transition {} ends in {} but transition {} starts in {}",
                pos,
                transitions[pos].to_state(),
                pos + 1,
                transitions[pos + 1].from_state()
            )));
        }
        Ok(Self { transitions })
    }

    /// Build from transitions already known to be adjacent (search results).
    pub(crate) fn from_walk(transitions: Vec<Transition>) -> Self {
        debug_assert!(!transitions.is_empty());
        debug_assert!(
            transitions
                .windows(2)
                .all(|pair| pair[0].to_state() == pair[1].from_state())
        );
        Self { transitions }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of transitions
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn start(&self) -> &StateId {
        self.transitions[0].from_state()
    }

    pub fn end(&self) -> &StateId {
        self.transitions[self.transitions.len() - 1].to_state()
    }

    /// Vertex sequence: the first source followed by every target
    pub fn vertices(&self) -> Vec<&StateId> {
        std::iter::once(self.start())
            .chain(self.transitions.iter().map(|t| t.to_state()))
            .collect()
    }

    /// True when no state is visited twice
    pub fn is_simple(&self) -> bool {
        let vertices = self.vertices();
        let unique: std::collections::HashSet<&StateId> = vertices.iter().copied().collect();
        unique.len() == vertices.len()
    }

    /// The minimal graph holding exactly this path's states and transitions
    pub fn to_graph(&self) -> StateGraph {
        path_to_graph(self)
    }
}

/// Builds the minimal [`StateGraph`] induced by a path.
///
/// States are added in visiting order (repeats collapse), then one fresh transition
/// per path step carrying the same labels between the same endpoints.
pub fn path_to_graph(path: &Path) -> StateGraph {
    let mut graph = StateGraph::new();
    for state in path.vertices() {
        graph.add_state(state.clone());
    }
    for transition in path.transitions() {
        graph.add_transition(transition.clone());
    }
    graph
}

/// Canonical text form: `[l1, l2, ...]`, multi-label steps as nested lists.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.transitions.iter().map(|t| t.display_label()).collect();
        write!(f, "[{}]", labels.join(", "))
    }
}

impl TryFrom<Vec<Transition>> for Path {
    type Error = Error;

    fn try_from(transitions: Vec<Transition>) -> Result<Self> {
        Path::new(transitions)
    }
}
