//! Error-path enumeration: every simple path that drives the model into the error state.

use crate::state_machine::search::simple_walks;
use crate::state_machine::{Path, StateGraph};
use crate::{Error, Result};
use std::collections::BTreeSet;

/// Find every simple path from `start` to `error_state`.
///
/// With `start == None` the search runs from every state other than `error_state`
/// and the results are merged. Paths are deduplicated structurally. A start with no
/// route to the error state, or a graph without the error state, simply contributes
/// nothing; starting at the error state itself yields the empty set.
///
/// The search is exhaustive and exponential in the worst case. Keep the model small,
/// or pass `max_len` to cap the number of transitions per path.
pub fn find_error_paths(
    graph: &StateGraph,
    start: Option<&str>,
    error_state: &str,
    max_len: Option<usize>,
) -> Result<BTreeSet<Path>> {
    if let Some(state) = start
        && !graph.contains_state(state)
    {
        return Err(Error::contract(format!(
            "start state {:?} is not in the graph",
            state
        )));
    }

    let mut paths = BTreeSet::new();
    let Some(err_idx) = graph.node_index(error_state) else {
        tracing::debug!("Error state {:?} is not in the graph", error_state);
        return Ok(paths);
    };

    let starts: Vec<&str> = match start {
        Some(state) => vec![state],
        None => graph
            .states()
            .map(String::as_str)
            .filter(|&s| s != error_state)
            .collect(),
    };

    for state in starts {
        let Some(start_idx) = graph.node_index(state) else {
            continue;
        };
        let walks = simple_walks(graph, start_idx, err_idx, max_len);
        tracing::debug!("{} error paths from {:?}", walks.len(), state);
        paths.extend(
            walks
                .iter()
                .map(|walk| Path::from_walk(graph.walk_transitions(walk))),
        );
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::DEFAULT_ERROR_STATE;
    use crate::state_machine::graph::tests::{graph, pointer_model};
    use std::collections::HashSet;

    fn rendered(paths: &BTreeSet<Path>) -> HashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_scenario_single_start() {
        let g = graph(&[("A", "B", "x"), ("B", "err", "y"), ("B", "B", "z")]);
        let paths = find_error_paths(&g, Some("A"), DEFAULT_ERROR_STATE, None).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths.iter().next().unwrap().to_string(), "[x, y]");
    }

    #[test]
    fn test_error_state_start_is_empty() {
        let g = pointer_model();
        assert!(find_error_paths(&g, Some("err"), "err", None).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_start_rejected() {
        let g = pointer_model();
        let err = find_error_paths(&g, Some("nowhere"), "err", None).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }

    #[test]
    fn test_unknown_start_rejected_without_error_state() {
        let g = graph(&[("A", "B", "x")]);
        let err = find_error_paths(&g, Some("nowhere"), "err", None).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }

    #[test]
    fn test_missing_error_state_is_empty() {
        let g = graph(&[("A", "B", "x")]);
        assert!(find_error_paths(&g, None, "err", None).unwrap().is_empty());
        assert!(find_error_paths(&g, Some("A"), "err", None).unwrap().is_empty());
    }

    #[test]
    fn test_all_starts_are_unioned() {
        let g = pointer_model();
        let paths = find_error_paths(&g, None, "err", None).unwrap();
        let expected: HashSet<String> = [
            "[free, assign_null, deref]",
            "[free, deref]",
            "[assign_null, deref]",
            "[malloc, assign_null, deref]",
            "[assign_null, deref]",
            "[deref]",
            "[malloc, free, deref]",
            "[deref]",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        // Same labels on different endpoints are still distinct paths.
        assert_eq!(paths.len(), 8);
        assert_eq!(rendered(&paths), expected);
        assert!(paths.iter().all(|p| p.is_simple() && p.end() == "err"));
    }

    #[test]
    fn test_max_len_caps_paths() {
        let g = pointer_model();
        let paths = find_error_paths(&g, Some("valid"), "err", Some(2)).unwrap();
        assert_eq!(
            rendered(&paths),
            HashSet::from(["[free, deref]".to_string(), "[assign_null, deref]".to_string()])
        );
    }

    #[test]
    fn test_structural_dedup() {
        let g = graph(&[("A", "err", "x")]);
        let mut paths = find_error_paths(&g, Some("A"), "err", None).unwrap();
        let again = find_error_paths(&g, None, "err", None).unwrap();
        paths.extend(again);
        assert_eq!(paths.len(), 1);
    }
}
