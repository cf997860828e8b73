//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Environment;

/// Command-line client for the users REST API
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(about = "Command-line client for the users REST API")]
#[command(long_about = "
users-api fetches and creates users through the remote users REST API and
prints the results as JSON on stdout. Logs go to stderr.

EXAMPLES:
    # Fetch a single user
    users-api get 2

    # List the second page of users
    users-api list --page 2

    # Create a user
    users-api create --name \"John Doe\" --job Developer

    # Point at another deployment with verbose logging
    users-api --base-url http://localhost:8080/api --verbose get 2
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load settings from this TOML file instead of the layered
    /// configuration directory. The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is applied.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Override the API base URL
    #[arg(long, value_name = "URL", value_parser = super::validation::validate_base_url)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch a single user by id
    ///
    /// Example:
    ///   users-api get 2
    Get {
        /// User id (must be greater than 0)
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Fetch one page of users
    ///
    /// Example:
    ///   users-api list --page 2
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },

    /// Create a user and print the assigned id
    ///
    /// Example:
    ///   users-api create --name "John Doe" --job Developer
    Create {
        /// Display name of the new user
        #[arg(long)]
        name: String,

        /// Job title of the new user
        #[arg(long)]
        job: String,
    },
}

impl Cli {
    /// Log level implied by `--verbose` / `--quiet`, if either was given
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
