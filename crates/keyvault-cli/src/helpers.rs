//! Input helper functions for the CLI.

use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use dialoguer::Password;
use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::constants::env_vars;
use crate::security::{read_secret_file, write_secret_file};

fn secret_from_env(name: &str) -> Option<SecretString> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

/// Prompt for the password, or read it from KEYVAULT_PASSWORD.
///
/// With `confirm`, the prompt asks twice (used when creating a blob).
pub fn prompt_password(confirm: bool) -> anyhow::Result<SecretString> {
    if let Some(password) = secret_from_env(env_vars::PASSWORD) {
        return Ok(password);
    }
    if !io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set {}.",
            env_vars::PASSWORD
        ));
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for the mnemonic, or read it from KEYVAULT_MNEMONIC.
///
/// Whitespace is normalized to single spaces.
pub fn prompt_mnemonic() -> anyhow::Result<SecretString> {
    let raw = match std::env::var(env_vars::MNEMONIC) {
        Ok(value) if !value.trim().is_empty() => Zeroizing::new(value),
        _ => {
            if !io::stdin().is_terminal() {
                return Err(anyhow::anyhow!(
                    "No mnemonic provided and no TTY available. Set {}.",
                    env_vars::MNEMONIC
                ));
            }
            Zeroizing::new(
                Password::new()
                    .with_prompt("Mnemonic")
                    .interact()
                    .map_err(|e| anyhow::anyhow!("Failed to read mnemonic: {}", e))?,
            )
        }
    };

    let words: Vec<&str> = raw.split_whitespace().collect();
    Ok(SecretString::from(words.join(" ")))
}

/// Read all input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    match path {
        Some(path) => read_secret_file(path, "Input file"),
        None => {
            let mut buffer = Zeroizing::new(Vec::new());
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

/// Write output to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8], force: bool) -> anyhow::Result<()> {
    match path {
        Some(path) => write_secret_file(path, bytes, force),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| anyhow::anyhow!("Failed to write stdout: {}", e))
        }
    }
}
