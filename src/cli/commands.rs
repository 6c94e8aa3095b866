//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::cli::OutputFormat;
use crate::parser::{GraphFormat, load_graph};
use crate::state_machine::{Path, StateGraph, find_error_paths};
use crate::{Config, Result};
use std::collections::BTreeSet;
use std::path::Path as FsPath;

/// Resolve the error state: command line first, then config
fn error_state_name(cli_value: Option<String>, config: &Config) -> String {
    cli_value.unwrap_or_else(|| config.default.error_state.clone())
}

/// Load a model and enumerate its error paths
fn load_error_paths(
    graph_path: &FsPath,
    format: Option<GraphFormat>,
    start: Option<&str>,
    error_state: &str,
    config: &Config,
) -> Result<(StateGraph, BTreeSet<Path>)> {
    let graph = load_graph(graph_path, format)?;
    let paths = find_error_paths(
        &graph,
        start,
        error_state,
        config.limits.max_error_path_length,
    )?;
    tracing::info!("Found {} error paths into {:?}", paths.len(), error_state);
    Ok((graph, paths))
}

/// Paths command implementation
pub mod paths {
    use super::*;

    pub fn execute(
        graph_path: &FsPath,
        format: Option<GraphFormat>,
        start: Option<String>,
        error_state: Option<String>,
        output: OutputFormat,
        config: &Config,
    ) -> Result<()> {
        let error_state = error_state_name(error_state, config);
        let (_, paths) =
            load_error_paths(graph_path, format, start.as_deref(), &error_state, config)?;
        crate::cli::output::output_paths(&mut std::io::stdout(), &paths, output, &error_state)
    }
}

/// Subpaths command implementation
pub mod subpaths {
    use super::*;
    use crate::state_machine::generate_subpaths;

    pub fn execute(
        graph_path: &FsPath,
        format: Option<GraphFormat>,
        start: Option<String>,
        error_state: Option<String>,
        max_length: Option<usize>,
        output: OutputFormat,
        config: &Config,
    ) -> Result<()> {
        let error_state = error_state_name(error_state, config);
        let mut limits = config.limits.clone();
        if let Some(max_length) = max_length {
            limits.max_subpath_length = max_length;
        }
        limits.validate()?;

        let (_, paths) =
            load_error_paths(graph_path, format, start.as_deref(), &error_state, config)?;

        let mut decompositions = Vec::with_capacity(paths.len());
        for path in paths {
            let subpaths = generate_subpaths(&path, &limits)?;
            tracing::debug!("{} decomposes into {} subpaths", path, subpaths.len());
            decompositions.push((path, subpaths));
        }

        crate::cli::output::output_subpaths(
            &mut std::io::stdout(),
            &decompositions,
            output,
            &error_state,
        )
    }
}

/// Cycles command implementation
pub mod cycles {
    use super::*;
    use crate::state_machine::find_all_cycles;

    pub fn execute(
        graph_path: &FsPath,
        format: Option<GraphFormat>,
        max_edges: Option<usize>,
        output: OutputFormat,
        config: &Config,
    ) -> Result<()> {
        let mut limits = config.limits.clone();
        if let Some(max_edges) = max_edges {
            limits.max_cycle_edges = max_edges;
        }
        limits.validate()?;

        let graph = load_graph(graph_path, format)?;
        tracing::info!(
            "Searching {} edge-induced subgraphs for cycles",
            1u64 << graph.transition_count().min(limits.max_cycle_edges)
        );
        let cycles = find_all_cycles(&graph, &limits)?;
        tracing::info!("Found {} cycles", cycles.len());

        crate::cli::output::output_cycles(
            &mut std::io::stdout(),
            &cycles,
            output,
            &config.default.error_state,
        )
    }
}

/// Reconstruct command implementation
pub mod reconstruct {
    use super::*;
    use crate::state_machine::{Transition, reconstruct};

    pub fn execute(graph_path: &FsPath, format: Option<GraphFormat>, labels: &[String]) -> Result<()> {
        let graph = load_graph(graph_path, format)?;
        let transitions = resolve_labels(&graph, labels)?;

        match reconstruct(&transitions) {
            Some(path) => {
                let states: Vec<&str> = path.vertices().into_iter().map(String::as_str).collect();
                println!("{}", path);
                println!("{}", states.join(" -> "));
            }
            None => {
                println!("No traversable path for [{}]", labels.join(", "));
            }
        }
        Ok(())
    }

    /// Map each label to a transition carrying it.
    ///
    /// After the first label, a transition leaving the previous step's target is
    /// preferred; the first match anywhere in the model is the fallback.
    pub(crate) fn resolve_labels(graph: &StateGraph, labels: &[String]) -> Result<Vec<Transition>> {
        let mut transitions: Vec<Transition> = Vec::with_capacity(labels.len());
        for label in labels {
            let chained = transitions.last().and_then(|prev| {
                graph
                    .outgoing_transitions(prev.to_state())
                    .into_iter()
                    .find(|t| t.has_label(label))
            });
            let Some(transition) = chained.or_else(|| graph.find_transition_by_label(label))
            else {
                crate::bail!("no transition labeled {:?} in the model", label);
            };
            transitions.push(transition.clone());
        }
        Ok(transitions)
    }
}

/// Inspect command implementation
pub mod inspect {
    use super::*;
    use crate::state_machine::analyze;

    pub fn execute(
        graph_path: &FsPath,
        format: Option<GraphFormat>,
        error_state: Option<String>,
        output: OutputFormat,
        config: &Config,
    ) -> Result<()> {
        let error_state = error_state_name(error_state, config);
        let graph = load_graph(graph_path, format)?;
        let report = analyze(&graph, &error_state);
        crate::cli::output::output_report(&mut std::io::stdout(), &graph, &report, output)
    }
}

/// Export command implementation
pub mod export {
    use super::*;
    use std::path::PathBuf;

    pub fn execute(
        graph_path: &FsPath,
        format: Option<GraphFormat>,
        start: Option<String>,
        error_state: Option<String>,
        dir: Option<PathBuf>,
        config: &Config,
    ) -> Result<()> {
        let error_state = error_state_name(error_state, config);
        let (_, paths) =
            load_error_paths(graph_path, format, start.as_deref(), &error_state, config)?;

        let dir = dir.unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}-error-paths",
                chrono::Utc::now().format("%Y%m%d%H%M%S")
            ))
        });
        let written = write_path_graphs(&dir, &paths, &error_state)?;
        println!("Exported {} error path(s) to {}", written.len(), dir.display());
        Ok(())
    }

    /// Write each path as `<n>.errpath.dot` under `dir`, returning the files written
    pub(crate) fn write_path_graphs(
        dir: &FsPath,
        paths: &BTreeSet<Path>,
        error_state: &str,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(paths.len());
        for (idx, path) in paths.iter().enumerate() {
            let file = dir.join(format!("{:03}.errpath.dot", idx + 1));
            let mut dot = format!("// {}\n", path);
            dot.push_str(&path.to_graph().to_dot(error_state));
            std::fs::write(&file, dot)?;
            tracing::debug!("Wrote {:?}", file);
            written.push(file);
        }
        Ok(written)
    }
}
