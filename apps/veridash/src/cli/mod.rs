//! # Veridash CLI Module
//!
//! This module implements the CLI interface for Veridash.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `roles` - List the dashboard roles and their landing paths
//! - `nav` - Show the navigation of a role
//! - `guard` - Preview a route guard decision
//! - `prefs` - Read or change the sidebar preference
//! - `config` - Print the effective configuration

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use veridash::config::Config;
use veridash_core::VeridashError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Veridash - Identity Verification Dashboard
///
/// Session, role navigation and route guard server for the dashboard.
#[derive(Parser, Debug)]
#[command(name = "veridash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides configuration)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List roles and their landing paths
    Roles,

    /// Show the navigation of a role
    Nav {
        /// Role name (user, verifier, enterprise, admin)
        #[arg(short, long)]
        role: String,
    },

    /// Preview the route guard decision for a path
    Guard {
        /// Requested path
        #[arg(short, long)]
        path: String,

        /// Role of an authenticated session; anonymous when omitted
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Read or change the sidebar preference
    Prefs {
        /// Set the collapsed flag
        #[arg(long, conflicts_with = "toggle")]
        sidebar_collapsed: Option<bool>,

        /// Flip the collapsed flag
        #[arg(short, long)]
        toggle: bool,

        /// Preference database (overrides configuration)
        #[arg(short = 'D', long)]
        database: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), VeridashError> {
    let config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::info!(
            config_file = ?cli.config,
            bind = %config.bind_addr(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(config, host, port).await,
        Some(Commands::Roles) => cmd_roles(json_mode),
        Some(Commands::Nav { role }) => cmd_nav(&role, json_mode),
        Some(Commands::Guard { path, role }) => cmd_guard(&path, role.as_deref(), json_mode),
        Some(Commands::Prefs {
            sidebar_collapsed,
            toggle,
            database,
        }) => cmd_prefs(&config, database, sidebar_collapsed, toggle, json_mode),
        Some(Commands::Config) => cmd_config(&config, json_mode),
        None => {
            // No subcommand - list roles by default
            cmd_roles(json_mode)
        }
    }
}
