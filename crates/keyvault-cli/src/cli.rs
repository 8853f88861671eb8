use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use keyvault_core::VERSION;

/// Keyvault - Password-protected wallet secrets and BIP32 key derivation
#[derive(Parser)]
#[command(name = "keyvault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "KEYVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt data under a password
    Encrypt(CipherArgs),

    /// Decrypt a blob produced by `encrypt`
    Decrypt(CipherArgs),

    /// Build a master key from a mnemonic and store it encrypted
    Master(MasterArgs),

    /// Derive keys from a stored master key
    Derive(DeriveArgs),

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments shared by `encrypt` and `decrypt`
#[derive(Args)]
pub struct CipherArgs {
    /// Read input from this file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `master` command
#[derive(Args)]
pub struct MasterArgs {
    /// Where to write the encrypted master key
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Optional BIP39 passphrase ("25th word")
    #[arg(long, env = "KEYVAULT_BIP39_PASSPHRASE", hide_env_values = true)]
    pub bip39_passphrase: Option<String>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `derive` command
#[derive(Args)]
pub struct DeriveArgs {
    /// Encrypted master key written by `master`
    #[arg(short, long, value_name = "FILE")]
    pub master: PathBuf,

    /// Derivation path (defaults to `derivation.default_path` from config)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Derive this many consecutive keys starting at the path's last index
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
