//! Command-line argument parsing for bankbuddy

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bankbuddy - Banking support assistant over a private document corpus
#[derive(Parser, Debug)]
#[command(name = "bankbuddy")]
#[command(version)]
#[command(about = "Answer banking questions via retrieval or action agents", long_about = None)]
pub struct Args {
    /// Persisted vector index file
    #[arg(long, default_value = "bankbuddy_index.json")]
    pub index: PathBuf,

    /// Use the hashing embedder instead of downloading the MiniLM model
    #[arg(long)]
    pub offline: bool,

    /// Show per-session telemetry summary
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest documents into the vector collection (drops and rebuilds)
    Ingest {
        /// Document files to ingest
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Answer a single query
    Ask {
        /// The customer query
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Replay the five demo scenarios over the bundled sample documents
    Demo,
}
