//! Output formatting module
//!
//! Renders paths, decompositions, cycles and model reports as text, JSON or DOT.
//! Text output uses the canonical forms so it can be compared line by line.

use crate::Result;
use crate::cli::OutputFormat;
use crate::state_machine::{AnalysisReport, Cycle, Path, StateGraph};
use serde_json::{Value, json};
use std::collections::BTreeSet;

fn path_json(path: &Path) -> Value {
    json!({
        "text": path.to_string(),
        "states": path.vertices(),
        "transitions": path.transitions(),
    })
}

fn write_dot_graphs(
    w: &mut impl std::io::Write,
    graphs: impl Iterator<Item = StateGraph>,
    error_state: &str,
) -> Result<()> {
    for graph in graphs {
        write!(w, "{}", graph.to_dot(error_state))?;
    }
    Ok(())
}

/// Output a set of error paths
pub fn output_paths(
    w: &mut impl std::io::Write,
    paths: &BTreeSet<Path>,
    format: OutputFormat,
    error_state: &str,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(w, "{} error path(s)", paths.len())?;
            for path in paths {
                let states: Vec<&str> = path.vertices().into_iter().map(String::as_str).collect();
                writeln!(w, "{:<40} {}", path.to_string(), states.join(" -> "))?;
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "summary": {
                    "error_state": error_state,
                    "total_paths": paths.len(),
                },
                "paths": paths.iter().map(path_json).collect::<Vec<_>>(),
            });
            serde_json::to_writer_pretty(&mut *w, &output)?;
            writeln!(w)?;
        }
        OutputFormat::Dot => {
            write_dot_graphs(w, paths.iter().map(Path::to_graph), error_state)?;
        }
    }
    Ok(())
}

/// Output each error path with its valid subsequences
pub fn output_subpaths(
    w: &mut impl std::io::Write,
    decompositions: &[(Path, BTreeSet<Path>)],
    format: OutputFormat,
    error_state: &str,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (path, subpaths) in decompositions {
                writeln!(w, "{} ({} subpath(s))", path, subpaths.len())?;
                for subpath in subpaths {
                    writeln!(w, "  {}", subpath)?;
                }
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "summary": {
                    "error_state": error_state,
                    "total_paths": decompositions.len(),
                    "total_subpaths": decompositions.iter().map(|(_, s)| s.len()).sum::<usize>(),
                },
                "paths": decompositions.iter().map(|(path, subpaths)| {
                    json!({
                        "path": path_json(path),
                        "subpaths": subpaths.iter().map(path_json).collect::<Vec<_>>(),
                    })
                }).collect::<Vec<_>>(),
            });
            serde_json::to_writer_pretty(&mut *w, &output)?;
            writeln!(w)?;
        }
        OutputFormat::Dot => {
            write_dot_graphs(
                w,
                decompositions
                    .iter()
                    .flat_map(|(_, subpaths)| subpaths.iter().map(Path::to_graph)),
                error_state,
            )?;
        }
    }
    Ok(())
}

/// Output a set of cycles
pub fn output_cycles(
    w: &mut impl std::io::Write,
    cycles: &BTreeSet<Cycle>,
    format: OutputFormat,
    error_state: &str,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(w, "{} cycle(s)", cycles.len())?;
            for cycle in cycles {
                let states: Vec<&str> = cycle.states().into_iter().map(String::as_str).collect();
                writeln!(w, "{:<40} {}", cycle.to_string(), states.join(" -> "))?;
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "summary": { "total_cycles": cycles.len() },
                "cycles": cycles.iter().map(|cycle| json!({
                    "text": cycle.to_string(),
                    "states": cycle.states(),
                    "transitions": cycle.transitions(),
                })).collect::<Vec<_>>(),
            });
            serde_json::to_writer_pretty(&mut *w, &output)?;
            writeln!(w)?;
        }
        OutputFormat::Dot => {
            let graphs = cycles.iter().map(|cycle| {
                let mut graph = StateGraph::new();
                for transition in cycle.transitions() {
                    graph.add_transition(transition.clone());
                }
                graph
            });
            write_dot_graphs(w, graphs, error_state)?;
        }
    }
    Ok(())
}

/// Output a model analysis report
pub fn output_report(
    w: &mut impl std::io::Write,
    graph: &StateGraph,
    report: &AnalysisReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(w, "Typestate Model Report")?;
            writeln!(w, "{}", "=".repeat(60))?;
            writeln!(w, "  Shape:            {}", report.shape.display_name())?;
            writeln!(w, "  States:           {}", report.states)?;
            writeln!(w, "  Transitions:      {}", report.transitions)?;
            writeln!(w, "  Self-loops:       {}", report.self_loops)?;
            writeln!(w, "  Branching factor: {:.2}", report.branching_factor)?;
            writeln!(w, "  Initial states:   {}", report.initial_states.join(", "))?;
            writeln!(w, "  Terminal states:  {}", report.terminal_states.join(", "))?;
            if report.has_error_state {
                writeln!(
                    w,
                    "  Reaches {:<9} {}",
                    format!("{}:", report.error_state),
                    report.reaches_error.join(", ")
                )?;
            } else {
                writeln!(w, "  Error state {:?} not present", report.error_state)?;
            }
            writeln!(w)?;
            writeln!(w, "{}", graph)?;
        }
        OutputFormat::Json => {
            let output = json!({
                "report": report,
                "graph": graph.to_string(),
            });
            serde_json::to_writer_pretty(&mut *w, &output)?;
            writeln!(w)?;
        }
        OutputFormat::Dot => {
            write!(w, "{}", graph.to_dot(&report.error_state))?;
        }
    }
    Ok(())
}
