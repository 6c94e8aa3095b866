//! Subsequence enumeration: decompose a path into every valid ordered sub-path.

use crate::config::LimitsConfig;
use crate::state_machine::reconstruct::reconstruct;
use crate::state_machine::subsets::Subsequences;
use crate::state_machine::{Path, Transition};
use crate::{Error, Result};
use std::collections::BTreeSet;

/// Every non-empty ordered subsequence of `path` that reconstructs to a valid path.
///
/// All `2^n - 1` subsequences of the `n` transitions are tried, so the cost is
/// exponential in the path length. Paths longer than
/// [`LimitsConfig::max_subpath_length`] are rejected with
/// [`Error::ResourceLimitExceeded`] before any work starts.
pub fn generate_subpaths(path: &Path, limits: &LimitsConfig) -> Result<BTreeSet<Path>> {
    if path.len() > limits.max_subpath_length {
        return Err(Error::resource_limit(
            "path length",
            path.len(),
            limits.max_subpath_length,
        ));
    }

    let transitions = path.transitions();
    let mut subpaths = BTreeSet::new();
    let mut candidates = 0usize;
    for indices in Subsequences::new(transitions.len()) {
        candidates += 1;
        let candidate: Vec<Transition> = indices.iter().map(|&i| transitions[i].clone()).collect();
        if let Some(subpath) = reconstruct(&candidate) {
            subpaths.insert(subpath);
        }
    }

    tracing::debug!(
        "{} candidate subsequences of {}, {} valid subpaths",
        candidates,
        path,
        subpaths.len()
    );
    Ok(subpaths)
}
