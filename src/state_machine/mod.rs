//! State machine module - Typestate graphs and the enumeration engine over them
//!
//! Everything here is synchronous and in-memory. Subsequence and cycle enumeration
//! are exponential and check their size ceilings before starting.

pub mod analyzer;
pub mod cycles;
pub mod error_paths;
pub mod graph;
pub mod path;
pub mod reconstruct;
mod search;
pub mod state;
pub mod subpaths;
pub mod subsets;
pub mod transition;

// Re-export key types
pub use analyzer::{AnalysisReport, ModelShape, analyze};
pub use cycles::{Cycle, find_all_cycles};
pub use error_paths::find_error_paths;
pub use graph::StateGraph;
pub use path::{Path, path_to_graph};
pub use reconstruct::{TieBreak, reconstruct};
pub use state::{DEFAULT_ERROR_STATE, StateClass, StateId};
pub use subpaths::generate_subpaths;
pub use subsets::{PowerSet, Subsequences};
pub use transition::Transition;
