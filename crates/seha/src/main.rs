// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seha - an emotion-research chat backend.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use seha_config::SehaConfig;

/// Seha - an emotion-research chat backend.
#[derive(Parser, Debug)]
#[command(name = "seha", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway (default).
    Serve,
    /// Print the resolved configuration with secrets redacted.
    Config,
    /// Print a user's stored emotion records as JSON.
    ResearchData {
        /// Username whose records to print.
        user: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> SehaConfig {
    let result = match path {
        Some(path) => seha_config::load_and_validate_path(path),
        None => seha_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            seha_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Config => commands::print_config(&config),
        Commands::ResearchData { user } => commands::print_research_data(&config, &user).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
