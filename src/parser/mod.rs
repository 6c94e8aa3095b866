//! Parser module - Graph ingestion from transition lists and JSON FSM descriptions
//!
//! The engine never touches files itself; this module turns text into a
//! [`StateGraph`] and leaves the graph to the caller.

use crate::Result;
use crate::state_machine::StateGraph;
use anyhow::Context;
use clap::ValueEnum;
use std::path::Path as FsPath;

pub mod dot;
pub mod fsm_json;

pub use dot::DotParser;
pub use fsm_json::FsmJsonParser;

/// Parser trait for graph ingestion
pub trait GraphSource {
    fn parse_graph(&self, input: &str) -> Result<StateGraph>;
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Line-oriented `src -> tgt [ label="L" ];` transition list
    Dot,
    /// JSON FSM description with `states` and `transitions`
    Json,
}

impl GraphFormat {
    /// Guess the format from a file extension; anything but `.json` is read as DOT.
    pub fn detect(path: &FsPath) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => GraphFormat::Json,
            _ => GraphFormat::Dot,
        }
    }

    pub fn parser(self, source_name: impl Into<String>) -> Box<dyn GraphSource> {
        match self {
            GraphFormat::Dot => Box::new(DotParser::new(source_name)),
            GraphFormat::Json => Box::new(FsmJsonParser::new(source_name)),
        }
    }
}

/// Read and parse a model file
pub fn load_graph(path: &FsPath, format: Option<GraphFormat>) -> Result<StateGraph> {
    let format = format.unwrap_or_else(|| GraphFormat::detect(path));
    tracing::debug!("Loading {:?} as {:?}", path, format);

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {:?}", path))?;

    let graph = format.parser(path.display().to_string()).parse_graph(&contents)?;
    tracing::info!(
        "Loaded {} states and {} transitions from {:?}",
        graph.state_count(),
        graph.transition_count(),
        path
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(GraphFormat::detect(FsPath::new("model.json")), GraphFormat::Json);
        assert_eq!(GraphFormat::detect(FsPath::new("MODEL.JSON")), GraphFormat::Json);
        assert_eq!(GraphFormat::detect(FsPath::new("model.dot")), GraphFormat::Dot);
        assert_eq!(GraphFormat::detect(FsPath::new("algo-test1")), GraphFormat::Dot);
    }

    #[test]
    fn test_missing_file() {
        let err = load_graph(FsPath::new("/nonexistent/model.dot"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read model file"));
    }

    #[test]
    fn test_dot_round_trip_through_file() {
        let mut graph = StateGraph::new();
        graph.add_labeled_transition("Open", "Close", "close");
        graph.add_labeled_transition("Close", "Close", "close");
        graph.add_labeled_transition("Open", "Error", "read");
        graph.add_labeled_transition("Open", "Error", "write");

        let path = std::env::temp_dir().join(format!(
            "typestate-paths-roundtrip-{}.dot",
            std::process::id()
        ));
        std::fs::write(&path, graph.to_dot("Error")).unwrap();
        let loaded = load_graph(&path, None).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.to_string(), graph.to_string());
    }
}
