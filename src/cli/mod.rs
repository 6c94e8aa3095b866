//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::parser::GraphFormat;
use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Typestate error-path enumerator CLI
#[derive(Parser, Debug)]
#[command(name = "typestate-paths")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Input format (detected from the file extension by default)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<GraphFormat>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every simple path into the error state
    Paths {
        /// Model file
        graph: PathBuf,

        /// Start state (all non-error states when omitted)
        #[arg(short, long)]
        start: Option<String>,

        /// Error state name (overrides config)
        #[arg(short, long, env = "TYPESTATE_ERROR_STATE")]
        error_state: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Decompose every error path into its valid ordered subsequences
    Subpaths {
        /// Model file
        graph: PathBuf,

        /// Start state (all non-error states when omitted)
        #[arg(short, long)]
        start: Option<String>,

        /// Error state name (overrides config)
        #[arg(short, long, env = "TYPESTATE_ERROR_STATE")]
        error_state: Option<String>,

        /// Longest path to decompose (overrides config)
        #[arg(long)]
        max_length: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List every cycle of every edge-induced subgraph
    Cycles {
        /// Model file
        graph: PathBuf,

        /// Largest edge count to enumerate (overrides config)
        #[arg(long)]
        max_edges: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Rebuild a path from transition labels given in order
    Reconstruct {
        /// Model file
        graph: PathBuf,

        /// Transition labels, in order
        #[arg(short, long, value_delimiter = ',', required = true)]
        labels: Vec<String>,
    },

    /// Summarise a model
    Inspect {
        /// Model file
        graph: PathBuf,

        /// Error state name (overrides config)
        #[arg(short, long, env = "TYPESTATE_ERROR_STATE")]
        error_state: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Write each error path as a standalone DOT graph
    Export {
        /// Model file
        graph: PathBuf,

        /// Start state (all non-error states when omitted)
        #[arg(short, long)]
        start: Option<String>,

        /// Error state name (overrides config)
        #[arg(short, long, env = "TYPESTATE_ERROR_STATE")]
        error_state: Option<String>,

        /// Output directory (timestamped by default)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one canonical form per line
    Text,
    /// JSON output
    Json,
    /// DOT format (Graphviz)
    Dot,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    let format = args.format;
    match args.command {
        Commands::Paths {
            graph,
            start,
            error_state,
            output,
        } => commands::paths::execute(&graph, format, start, error_state, output, &config),
        Commands::Subpaths {
            graph,
            start,
            error_state,
            max_length,
            output,
        } => commands::subpaths::execute(
            &graph,
            format,
            start,
            error_state,
            max_length,
            output,
            &config,
        ),
        Commands::Cycles {
            graph,
            max_edges,
            output,
        } => commands::cycles::execute(&graph, format, max_edges, output, &config),
        Commands::Reconstruct { graph, labels } => {
            commands::reconstruct::execute(&graph, format, &labels)
        }
        Commands::Inspect {
            graph,
            error_state,
            output,
        } => commands::inspect::execute(&graph, format, error_state, output, &config),
        Commands::Export {
            graph,
            start,
            error_state,
            dir,
        } => commands::export::execute(&graph, format, start, error_state, dir, &config),
    }
}
