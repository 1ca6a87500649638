// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passfort - a self-hosted credential vault.
//!
//! This is the binary entry point for the Passfort server.

mod serve;

use clap::{Parser, Subcommand};

/// Passfort - a self-hosted credential vault.
#[derive(Parser, Debug)]
#[command(name = "passfort", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Passfort API server.
    Serve,
    /// Generate a fresh base64-encoded vault master key.
    Keygen,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        // Keygen runs before any config check: it exists precisely so a new
        // deployment can produce the key its config does not have yet.
        Some(Commands::Keygen) => match passfort_crypto::MasterKey::generate() {
            Ok(key) => println!("{}", key.to_base64()),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Serve) => {
            let config = match passfort_config::load_and_validate() {
                Ok(config) => config,
                Err(errors) => {
                    passfort_config::render_errors(&errors);
                    std::process::exit(1);
                }
            };
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("passfort: use --help for available commands");
        }
    }
}
