//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the (URL, alias) dataset files by batch-shortening random URLs
    Generate {
        /// Number of links to create
        #[arg(long, value_name = "N")]
        count: Option<usize>,

        /// Maximum number of in-flight shorten requests
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,

        /// Output file for the original URLs
        #[arg(long, value_name = "PATH")]
        urls_file: Option<PathBuf>,

        /// Output file for the assigned aliases
        #[arg(long, value_name = "PATH")]
        aliases_file: Option<PathBuf>,
    },

    /// Replay weighted user traffic against the target service
    Run {
        /// Total number of virtual users
        #[arg(long, value_name = "N")]
        users: Option<usize>,

        /// Run duration in seconds
        #[arg(long, value_name = "SECONDS")]
        duration: Option<u64>,
    },

    /// Load and validate the configuration, then print the effective
    /// configuration as YAML
    CheckConfig,
}
