use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use keyvault_core::crypto::validate_password;
use keyvault_core::{decrypt, PasswordCipher};

use crate::cli::CipherArgs;
use crate::config::KeyvaultConfig;
use crate::errors::CliError;
use crate::helpers::{prompt_password, read_input, write_output};

pub fn handle_encrypt(args: &CipherArgs, config: &KeyvaultConfig) -> anyhow::Result<()> {
    let cipher = PasswordCipher::new(config.kdf.params()).map_err(CliError::from)?;
    let plaintext = read_input(args.input.as_deref())?;

    let password = prompt_password(true)?;
    validate_password(password.expose_secret()).map_err(CliError::from)?;

    let blob = cipher.encrypt(password.expose_secret().as_bytes(), &plaintext)?;
    write_output(args.output.as_deref(), &blob, args.force)
}

pub fn handle_decrypt(args: &CipherArgs) -> anyhow::Result<()> {
    let blob = read_input(args.input.as_deref())?;
    let password = prompt_password(false)?;

    let plaintext = Zeroizing::new(
        decrypt(password.expose_secret().as_bytes(), &blob).map_err(CliError::from)?,
    );
    write_output(args.output.as_deref(), &plaintext, args.force)
}
