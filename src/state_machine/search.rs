//! Walk search primitives shared by the enumerations.
//!
//! Bounded walks visit outgoing edges in insertion order, so the tie-break rules of
//! reconstruction are reproducible. Simple walks feed ordered sets and carry no
//! ordering guarantee.

use crate::state_machine::StateGraph;
use petgraph::algo::{all_simple_paths, dijkstra};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use petgraph::visit::Reversed;
use std::collections::{HashMap, VecDeque};
use std::hash::RandomState;

/// A sequence of edge indices, each starting where the previous one ended.
/// An empty walk stands for "staying put".
pub(crate) type Walk = Vec<EdgeIndex>;

/// Fewest transitions needed from every node that can reach `target`.
fn distances_to(graph: &StateGraph, target: NodeIndex) -> HashMap<NodeIndex, usize> {
    dijkstra(Reversed(&graph.graph), target, None, |_| 1usize)
        .into_iter()
        .collect()
}

/// Every simple walk (no repeated state) from `from` to `to`.
///
/// The number of results is exponential in the worst case; callers bound the graph.
/// `max_len` optionally caps the number of transitions. `from == to` yields nothing.
pub(crate) fn simple_walks(
    graph: &StateGraph,
    from: NodeIndex,
    to: NodeIndex,
    max_len: Option<usize>,
) -> Vec<Walk> {
    if from == to || max_len == Some(0) {
        return Vec::new();
    }
    all_simple_paths::<Vec<NodeIndex>, _, RandomState>(
        &graph.graph,
        from,
        to,
        0,
        max_len.map(|max| max - 1),
    )
    .map(|nodes| {
        nodes
            .windows(2)
            .filter_map(|pair| graph.graph.find_edge(pair[0], pair[1]))
            .collect()
    })
    .collect()
}

/// Every walk, simple or not, from `from` to `to` with at most `max_len` transitions,
/// in breadth-first order (shorter walks first).
///
/// When `from == to` the empty walk is reported first. Walks may pass through `to`
/// and come back to it.
pub(crate) fn bounded_walks(
    graph: &StateGraph,
    from: NodeIndex,
    to: NodeIndex,
    max_len: usize,
) -> Vec<Walk> {
    let distance = distances_to(graph, to);
    let mut complete = Vec::new();
    if !distance.contains_key(&from) {
        return complete;
    }

    let mut queue: VecDeque<(NodeIndex, Walk)> = VecDeque::from([(from, Vec::new())]);
    while let Some((node, walk)) = queue.pop_front() {
        if node == to {
            complete.push(walk.clone());
        }
        for (edge, next) in graph.successors(node) {
            let Some(&remaining) = distance.get(&next) else {
                continue;
            };
            if walk.len() + 1 + remaining > max_len {
                continue;
            }
            let mut extended = walk.clone();
            extended.push(edge);
            queue.push_back((next, extended));
        }
    }

    complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::graph::tests::graph;

    fn labels(graph: &StateGraph, walks: &[Walk]) -> Vec<String> {
        walks
            .iter()
            .map(|w| {
                graph
                    .walk_transitions(w)
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect()
    }

    #[test]
    fn test_simple_walks_skip_loops() {
        let g = graph(&[("A", "B", "x"), ("B", "err", "y"), ("B", "B", "z")]);
        let (a, err) = (g.node_index("A").unwrap(), g.node_index("err").unwrap());
        assert_eq!(labels(&g, &simple_walks(&g, a, err, None)), ["x,y"]);
        assert!(simple_walks(&g, err, err, None).is_empty());
        assert!(simple_walks(&g, err, a, None).is_empty());
    }

    #[test]
    fn test_simple_walks_all_routes() {
        let g = graph(&[
            ("A", "B", "ab"),
            ("A", "C", "ac"),
            ("B", "C", "bc"),
            ("C", "err", "ce"),
            ("B", "err", "be"),
            ("C", "A", "ca"),
        ]);
        let (a, err) = (g.node_index("A").unwrap(), g.node_index("err").unwrap());
        let mut all = labels(&g, &simple_walks(&g, a, err, None));
        all.sort();
        assert_eq!(all, ["ab,bc,ce", "ab,be", "ac,ce"]);

        let mut short = labels(&g, &simple_walks(&g, a, err, Some(2)));
        short.sort();
        assert_eq!(short, ["ab,be", "ac,ce"]);
        assert!(simple_walks(&g, a, err, Some(1)).is_empty());
        assert!(simple_walks(&g, a, err, Some(0)).is_empty());
    }

    #[test]
    fn test_bounded_walks_self_target() {
        let g = graph(&[("B", "B", "z")]);
        let b = g.node_index("B").unwrap();
        let walks = bounded_walks(&g, b, b, 1);
        assert_eq!(walks.len(), 2);
        assert!(walks[0].is_empty());
        assert_eq!(labels(&g, &walks[1..]), ["z"]);
    }

    #[test]
    fn test_bounded_walks_breadth_first() {
        let g = graph(&[("A", "B", "x"), ("B", "err", "y"), ("B", "B", "z")]);
        let (a, b) = (g.node_index("A").unwrap(), g.node_index("B").unwrap());
        assert_eq!(labels(&g, &bounded_walks(&g, a, b, 3)), ["x", "x,z", "x,z,z"]);
    }
}
