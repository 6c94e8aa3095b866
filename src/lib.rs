//! Typestate Paths
//!
//! Test-sequence generation for typestate / finite-state models.
//!
//! This library provides functionality for:
//! - Loading labeled transition graphs from transition lists or JSON FSM descriptions
//! - Enumerating every simple operation sequence that drives a model into its error state
//! - Decomposing a sequence into every valid ordered sub-sequence
//! - Discovering every simple cycle across all edge-induced subgraphs
//! - Rendering graphs and paths in stable canonical text, JSON and DOT
//!
//! ```
//! use typestate_paths::state_machine::{StateGraph, find_error_paths};
//!
//! let mut graph = StateGraph::new();
//! graph.add_labeled_transition("A", "B", "x");
//! graph.add_labeled_transition("B", "err", "y");
//!
//! let paths = find_error_paths(&graph, Some("A"), "err", None).unwrap();
//! assert_eq!(paths.iter().next().unwrap().to_string(), "[x, y]");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod state_machine;

pub use config::{Config, LimitsConfig};
pub use error::{Error, Result};
pub use state_machine::{
    Cycle, Path, StateGraph, Transition, find_all_cycles, find_error_paths, generate_subpaths,
    path_to_graph, reconstruct,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
