//! CLI module
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `chunk`: process a single file and print the result as JSON

pub mod chunk;
pub mod serve;

use clap::{Parser, Subcommand};

/// Intelligent Document Chunking API
#[derive(Parser)]
#[command(name = "intelligent-chunking")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Classify and chunk a single file, printing the result to stdout
    Chunk(chunk::ChunkArgs),
}
