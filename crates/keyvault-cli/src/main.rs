//! Keyvault CLI - password-protected wallet secrets and BIP32 key derivation
//!
//! This is the command-line interface for Keyvault. It provides a
//! user-friendly interface to the core library functionality.

mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod security;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommand};
use crate::config::{load_config, resolve_config_path};
use crate::constants::env_vars;
use crate::errors::exit_code_for;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(exit_code_for(&err));
    }
}

/// Log to stderr so stdout stays clean for blobs and keys.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(env_vars::LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;

    // Writing a fresh config must work even when the current one is broken.
    if let Commands::Config {
        command: ConfigCommand::Init { force },
    } = &cli.command
    {
        return commands::handle_config_init(&config_path, *force, cli.quiet);
    }

    let config = load_config(&config_path)?;
    tracing::debug!(config = %config_path.display(), "loaded configuration");

    match &cli.command {
        Commands::Encrypt(args) => commands::handle_encrypt(args, &config),
        Commands::Decrypt(args) => commands::handle_decrypt(args),
        Commands::Master(args) => commands::handle_master(args, &config, cli.quiet),
        Commands::Derive(args) => commands::handle_derive(args, &config, cli.quiet),
        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => {
                commands::handle_config_init(&config_path, *force, cli.quiet)
            }
            ConfigCommand::Show { json } => {
                commands::handle_config_show(&config_path, &config, *json)
            }
        },
    }
}
