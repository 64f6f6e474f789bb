// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zenith - a WhatsApp campaign console.
//!
//! This is the binary entry point for the Zenith CLI.

use clap::{Parser, Subcommand};

mod broadcast;
mod campaigns;
mod clients;
mod doctor;

/// Zenith - a WhatsApp campaign console.
#[derive(Parser, Debug)]
#[command(name = "zenith", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a broadcast mission against a client segment.
    Broadcast(broadcast::BroadcastArgs),
    /// List decoded client records from the bridge.
    Clients {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// List recorded campaigns.
    Campaigns {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Run diagnostic checks against the configured environment.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zenith={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match zenith_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            zenith_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Broadcast(args)) => broadcast::run_broadcast(&config, args).await,
        Some(Commands::Clients { json }) => clients::run_clients(&config, json).await,
        Some(Commands::Campaigns { json }) => campaigns::run_campaigns(&config, json).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        None => {
            println!("zenith: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
