//! Power-set cycle enumeration.
//!
//! A simple-cycle search over the full graph can miss cycles that only become simple
//! once some interfering transitions are left out of a test scenario. So every
//! edge-induced subgraph (one per subset of the transitions) is searched on its own,
//! and the results are merged. That is `2^|E|` searches: only use this on small
//! typestate models. [`LimitsConfig::max_cycle_edges`] caps `|E|`.

use crate::config::{LimitsConfig, MAX_POWER_SET_BITS};
use crate::state_machine::subsets::PowerSet;
use crate::state_machine::{StateGraph, StateId, Transition};
use crate::{Error, Result};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex as SubNode};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A closed walk `c1..ck` where each transition ends where the next (cyclically) starts.
///
/// Stored rotated to start at its smallest source state, so a cycle and its rotations
/// compare, hash and order as the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cycle {
    transitions: Vec<Transition>,
}

impl Cycle {
    pub fn new(mut transitions: Vec<Transition>) -> Result<Self> {
        let closes = !transitions.is_empty()
            && (0..transitions.len()).all(|i| {
                transitions[i].to_state() == transitions[(i + 1) % transitions.len()].from_state()
            });
        if !closes {
            return Err(Error::contract("transitions do not form a closed cycle"));
        }
        if let Some(pivot) = (0..transitions.len()).min_by_key(|&i| transitions[i].from_state())
        {
            transitions.rotate_left(pivot);
        }
        Ok(Self { transitions })
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_self_loop(&self) -> bool {
        self.transitions.len() == 1
    }

    /// States in visiting order, starting from the smallest
    pub fn states(&self) -> Vec<&StateId> {
        self.transitions.iter().map(|t| t.from_state()).collect()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.transitions.iter().map(|t| t.display_label()).collect();
        write!(f, "[{}]", labels.join(", "))
    }
}

/// Find every cycle of every edge-induced subgraph of `graph`, self-loops included.
///
/// Fails with [`Error::ResourceLimitExceeded`] when the graph has more transitions than
/// `limits.max_cycle_edges`, or than [`MAX_POWER_SET_BITS`] whatever the configured limit.
pub fn find_all_cycles(graph: &StateGraph, limits: &LimitsConfig) -> Result<BTreeSet<Cycle>> {
    let edges: Vec<EdgeIndex> = graph.graph.edge_indices().collect();
    let ceiling = limits.max_cycle_edges.min(MAX_POWER_SET_BITS);
    if edges.len() > ceiling {
        return Err(Error::resource_limit("edge count", edges.len(), ceiling));
    }

    let mut cycles = BTreeSet::new();
    let mut subgraphs = 0usize;
    for subset in PowerSet::new(edges.len()) {
        subgraphs += 1;
        let chosen: Vec<EdgeIndex> = subset.iter().map(|&i| edges[i]).collect();
        let subgraph = EdgeSubgraph::new(graph, &chosen);

        for vertices in subgraph.simple_cycles() {
            let transitions = (0..vertices.len())
                .filter_map(|i| {
                    let (from, to) = (vertices[i], vertices[(i + 1) % vertices.len()]);
                    graph.graph.find_edge(from, to)
                })
                .collect::<Vec<_>>();
            cycles.insert(Cycle::new(graph.walk_transitions(&transitions))?);
        }

        // General cycle search leaves out single-vertex loops.
        for edge in subgraph.self_loops() {
            cycles.insert(Cycle::new(graph.walk_transitions(&[edge]))?);
        }
    }

    tracing::debug!(
        "{} distinct cycles across {} edge-induced subgraphs",
        cycles.len(),
        subgraphs
    );
    Ok(cycles)
}

/// The subgraph formed by a subset of transitions and the states they touch.
struct EdgeSubgraph {
    graph: DiGraph<NodeIndex, EdgeIndex>,
}

impl EdgeSubgraph {
    fn new(parent: &StateGraph, edges: &[EdgeIndex]) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<NodeIndex, SubNode> = HashMap::new();
        for &edge in edges {
            let Some((from, to)) = parent.graph.edge_endpoints(edge) else {
                continue;
            };
            let from_sub = *nodes.entry(from).or_insert_with(|| graph.add_node(from));
            let to_sub = *nodes.entry(to).or_insert_with(|| graph.add_node(to));
            graph.add_edge(from_sub, to_sub, edge);
        }
        Self { graph }
    }

    fn self_loops(&self) -> Vec<EdgeIndex> {
        self.graph
            .raw_edges()
            .iter()
            .filter(|edge| edge.source() == edge.target())
            .map(|edge| edge.weight)
            .collect()
    }

    /// Simple cycles of two or more vertices, as parent-graph vertex sequences.
    ///
    /// Each cycle is rooted at its lowest subgraph vertex and only extended through
    /// higher vertices of the same strongly connected component, so it is found once.
    fn simple_cycles(&self) -> Vec<Vec<NodeIndex>> {
        let mut cycles = Vec::new();
        for component in tarjan_scc(&self.graph) {
            if component.len() < 2 {
                continue;
            }
            let members: HashSet<SubNode> = component.iter().copied().collect();
            let mut roots = component.clone();
            roots.sort();
            for &root in &roots {
                self.cycles_from(root, &members, &mut cycles);
            }
        }
        cycles
    }

    fn cycles_from(
        &self,
        root: SubNode,
        members: &HashSet<SubNode>,
        cycles: &mut Vec<Vec<NodeIndex>>,
    ) {
        let allowed = |node: SubNode| node > root && members.contains(&node);

        let mut trail = vec![root];
        let mut on_trail: HashSet<SubNode> = HashSet::from([root]);
        let mut stack = vec![self.graph.neighbors(root).collect::<Vec<_>>().into_iter()];

        while let Some(neighbors) = stack.last_mut() {
            let Some(next) = neighbors.next() else {
                stack.pop();
                if let Some(node) = trail.pop() {
                    on_trail.remove(&node);
                }
                continue;
            };
            if next == root && trail.len() > 1 {
                cycles.push(trail.iter().map(|&n| self.graph[n]).collect());
            } else if allowed(next) && !on_trail.contains(&next) {
                trail.push(next);
                on_trail.insert(next);
                stack.push(self.graph.neighbors(next).collect::<Vec<_>>().into_iter());
            }
        }
    }
}
