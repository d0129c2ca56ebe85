//! Command-line interface, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// Taskboard - project and task tracking API
#[derive(Parser)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "daemon", alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// List registered users
    #[command(alias = "ls-users")]
    Users,

    /// List projects with their task counts
    #[command(alias = "ls-projects")]
    Projects,

    /// Connect to the database, apply migrations and report
    #[command(alias = "-c", alias = "--check")]
    Check,
}

pub use commands::*;
