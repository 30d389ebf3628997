//! CLI module for the Testero Content API
//!
//! Provides subcommands for running the service:
//! - `serve`: HTTP API server (default)
//! - `content-check`: print the per-domain availability report

pub mod content_check;
pub mod serve;

use clap::{Parser, Subcommand};

/// Testero Content API - domain-weighted question selection service
#[derive(Parser)]
#[command(name = "testero-content-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print the per-domain availability report and flag content gaps
    ContentCheck,
}
