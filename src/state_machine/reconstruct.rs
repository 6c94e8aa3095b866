//! Path reconstruction: turn an arbitrary ordered list of transitions back into a
//! canonical [`Path`], or report that the list cannot be traversed.
//!
//! The list is loaded into a scratch graph and candidate walks between its first
//! source and last target are searched there. Which candidate wins is decided by a
//! [`TieBreak`] rule:
//!
//! - **Loop case** (first source equals last target): all walks of at most one
//!   transition are listed. The empty "stay put" walk always comes first, so the
//!   second candidate ([`TieBreak::SecondCandidate`]) is the actual loop edge.
//! - **General case**: all walks of exactly as many transitions as the list that use
//!   each given transition exactly as often as the list does. The last candidate in
//!   breadth-first order ([`TieBreak::LastCandidate`]) wins; it revisits states the
//!   same way the input does.
//!
//! A list revisiting a state more than twice may have several qualifying
//! permutations; the rule above picks one deterministically.

use crate::state_machine::search::{Walk, bounded_walks};
use crate::state_machine::{Path, StateGraph, Transition};
use petgraph::stable_graph::EdgeIndex;
use std::collections::HashMap;

/// Which search candidate a reconstruction keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Index 1: skips the empty walk reported first for same-endpoint searches
    SecondCandidate,
    /// The final candidate in search order
    LastCandidate,
}

impl TieBreak {
    fn select(self, mut candidates: Vec<Walk>) -> Option<Walk> {
        match self {
            TieBreak::SecondCandidate => (candidates.len() > 1).then(|| candidates.swap_remove(1)),
            TieBreak::LastCandidate => candidates.pop(),
        }
    }
}

/// Reconstruct a path from an ordered list of transitions.
///
/// Returns `None` for an empty list or when no traversal matches the list; callers
/// treat that as "discard this candidate", not as a failure.
pub fn reconstruct(transitions: &[Transition]) -> Option<Path> {
    let (first, last) = (transitions.first()?, transitions.last()?);

    let mut scratch = StateGraph::new();
    let used: Vec<EdgeIndex> = transitions
        .iter()
        .map(|t| scratch.add_transition(t.clone()))
        .collect();

    let src = scratch.node_index(first.from_state())?;
    let tgt = scratch.node_index(last.to_state())?;

    let walk = if src == tgt {
        TieBreak::SecondCandidate.select(bounded_walks(&scratch, src, tgt, 1))
    } else {
        let wanted = edge_counts(&used);
        let candidates: Vec<Walk> = bounded_walks(&scratch, src, tgt, transitions.len())
            .into_iter()
            .filter(|walk| walk.len() == transitions.len() && edge_counts(walk) == wanted)
            .collect();
        if candidates.len() > 1 {
            tracing::debug!(
                "{} candidate traversals for {} transitions, keeping the last",
                candidates.len(),
                transitions.len()
            );
        }
        TieBreak::LastCandidate.select(candidates)
    }?;

    Some(Path::from_walk(scratch.walk_transitions(&walk)))
}

fn edge_counts(walk: &[EdgeIndex]) -> HashMap<EdgeIndex, usize> {
    let mut counts = HashMap::new();
    for &edge in walk {
        *counts.entry(edge).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::find_error_paths;
    use crate::state_machine::graph::tests::pointer_model;

    fn t(from: &str, to: &str, label: &str) -> Transition {
        Transition::labeled(from, to, label)
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(reconstruct(&[]), None);
    }

    #[test]
    fn test_single_self_loop_is_not_trivial() {
        let path = reconstruct(&[t("B", "B", "z")]).unwrap();
        assert_eq!(path.to_string(), "[z]");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_out_of_order_list_rejected() {
        let list = [t("A", "B", "x"), t("B", "err", "y"), t("B", "B", "z")];
        assert_eq!(reconstruct(&list), None);
    }

    #[test]
    fn test_gap_rejected() {
        let list = [t("A", "B", "x"), t("C", "err", "y")];
        assert_eq!(reconstruct(&list), None);
    }

    #[test]
    fn test_simple_path_is_idempotent() {
        let path = Path::new(vec![
            t("valid", "dangle", "free"),
            t("dangle", "null", "assign_null"),
            t("null", "err", "deref"),
        ])
        .unwrap();
        assert_eq!(reconstruct(path.transitions()), Some(path));
    }

    #[test]
    fn test_every_error_path_is_idempotent() {
        let paths = find_error_paths(&pointer_model(), None, "err", None).unwrap();
        assert_eq!(paths.len(), 8);
        for path in paths {
            assert_eq!(reconstruct(path.transitions()), Some(path.clone()), "{}", path);
        }
    }

    #[test]
    fn test_multi_label_step_is_idempotent() {
        let multi = Transition::new("B", "err", vec!["y".to_string(), "y2".to_string()]).unwrap();
        let path = Path::new(vec![t("A", "B", "x"), multi]).unwrap();
        let rebuilt = reconstruct(path.transitions()).unwrap();
        assert_eq!(rebuilt.to_string(), "[x, [y, y2]]");
        assert_eq!(rebuilt, path);
    }

    #[test]
    fn test_loop_inside_path() {
        let list = [t("A", "B", "x"), t("B", "B", "z"), t("B", "err", "y")];
        let path = reconstruct(&list).unwrap();
        assert_eq!(path.to_string(), "[x, z, y]");
    }

    #[test]
    fn test_repeated_loop() {
        let list = [t("A", "B", "x"), t("B", "B", "z"), t("B", "B", "z"), t("B", "err", "y")];
        let path = reconstruct(&list).unwrap();
        assert_eq!(path.to_string(), "[x, z, z, y]");
    }

    #[test]
    fn test_tie_break_rules() {
        let walks = vec![Vec::new(), vec![EdgeIndex::new(0)], vec![EdgeIndex::new(1)]];
        assert_eq!(
            TieBreak::SecondCandidate.select(walks.clone()),
            Some(vec![EdgeIndex::new(0)])
        );
        assert_eq!(
            TieBreak::LastCandidate.select(walks),
            Some(vec![EdgeIndex::new(1)])
        );
        assert_eq!(TieBreak::SecondCandidate.select(vec![Vec::new()]), None);
        assert_eq!(TieBreak::LastCandidate.select(Vec::new()), None);
    }
}
