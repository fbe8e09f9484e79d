//! # Veridash - Dashboard Session Server
//!
//! The main binary for the Veridash dashboard.
//!
//! This application provides:
//! - HTTP API server (axum-based)
//! - CLI interface for roles, navigation, route guard and preferences
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/veridash (THE BINARY)               │
//! │                                                          │
//! │  ┌─────────────┐   ┌─────────────┐   ┌───────────────┐   │
//! │  │    CLI      │   │  HTTP API   │   │ SessionHandle │   │
//! │  │   (clap)    │   │   (axum)    │   │ (async check) │   │
//! │  └──────┬──────┘   └──────┬──────┘   └───────┬───────┘   │
//! │         └─────────────────┼──────────────────┘           │
//! │                           ▼                              │
//! │                   ┌───────────────┐                      │
//! │                   │ veridash-core │                      │
//! │                   │ (THE LOGIC)   │                      │
//! │                   └───────────────┘                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! veridash server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! veridash roles
//! veridash nav --role admin
//! veridash guard --path /admin/users --role verifier
//! veridash prefs --toggle
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // VERIDASH_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("VERIDASH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "veridash=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Veridash startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗   ██╗███████╗██████╗ ██╗██████╗  █████╗ ███████╗██╗  ██╗
  ██║   ██║██╔════╝██╔══██╗██║██╔══██╗██╔══██╗██╔════╝██║  ██║
  ██║   ██║█████╗  ██████╔╝██║██║  ██║███████║███████╗███████║
  ╚██╗ ██╔╝██╔══╝  ██╔══██╗██║██║  ██║██╔══██║╚════██║██╔══██║
   ╚████╔╝ ███████╗██║  ██║██║██████╔╝██║  ██║███████║██║  ██║
    ╚═══╝  ╚══════╝╚═╝  ╚═╝╚═╝╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝

  Identity Verification Dashboard v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
