use secrecy::ExposeSecret;

use keyvault_core::crypto::validate_password;
use keyvault_core::hd::seed_from_mnemonic;
use keyvault_core::{ExtendedKey, PasswordCipher};

use crate::cli::MasterArgs;
use crate::config::KeyvaultConfig;
use crate::errors::CliError;
use crate::helpers::{prompt_mnemonic, prompt_password};
use crate::security::write_secret_file;

/// Build the BIP32 master key from a mnemonic and store its `xprv`
/// encrypted under a new password.
pub fn handle_master(args: &MasterArgs, config: &KeyvaultConfig, quiet: bool) -> anyhow::Result<()> {
    // Fail before asking for any secrets.
    if args.output.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "File already exists: {} (use --force to overwrite)",
            args.output.display()
        ))
        .into());
    }
    let cipher = PasswordCipher::new(config.kdf.params()).map_err(CliError::from)?;

    let mnemonic = prompt_mnemonic()?;
    let seed = seed_from_mnemonic(
        mnemonic.expose_secret(),
        args.bip39_passphrase.as_deref().unwrap_or(""),
    );
    let master = ExtendedKey::from_seed(seed.as_bytes())?;

    let password = prompt_password(true)?;
    validate_password(password.expose_secret()).map_err(CliError::from)?;

    let blob = cipher.encrypt(
        password.expose_secret().as_bytes(),
        master.to_base58().as_bytes(),
    )?;
    write_secret_file(&args.output, &blob, args.force)?;

    if !quiet {
        println!(
            "Stored master key {} at {}",
            hex::encode(master.fingerprint()),
            args.output.display()
        );
    }
    Ok(())
}
