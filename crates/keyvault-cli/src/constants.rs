//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Input file, master key file or config not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, path, blob or configuration.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password or tampered blob).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    /// Password for encrypt/decrypt/master/derive, skips the prompt.
    pub const PASSWORD: &str = "KEYVAULT_PASSWORD";

    /// BIP39 mnemonic for `master`, skips the prompt.
    pub const MNEMONIC: &str = "KEYVAULT_MNEMONIC";

    /// `tracing` filter directives, e.g. `keyvault_core=debug`.
    pub const LOG: &str = "KEYVAULT_LOG";
}
