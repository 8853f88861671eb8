use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use keyvault_core::hd::{derive_path, derive_range, ChildIndex, DerivationPath, HARDENED_OFFSET};
use keyvault_core::{decrypt, ExtendedKey};

use crate::cli::DeriveArgs;
use crate::config::KeyvaultConfig;
use crate::errors::CliError;
use crate::helpers::prompt_password;
use crate::output::{derived_keys_json, print_derived_keys};
use crate::security::read_secret_file;

pub fn handle_derive(args: &DeriveArgs, config: &KeyvaultConfig, quiet: bool) -> anyhow::Result<()> {
    let path_text = args
        .path
        .as_deref()
        .unwrap_or(config.derivation.default_path.as_str());
    let path: DerivationPath = path_text.parse().map_err(CliError::from)?;
    if args.count == 0 {
        return Err(CliError::invalid_input("--count must be at least 1").into());
    }

    let master = load_master(args)?;

    let keys = if args.count == 1 {
        let key = derive_path(&master, &path)?;
        vec![(path, key)]
    } else {
        derive_consecutive(&master, &path, args.count)?
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&derived_keys_json(&keys))?
        );
    } else {
        print_derived_keys(&keys, quiet);
    }
    Ok(())
}

fn load_master(args: &DeriveArgs) -> anyhow::Result<ExtendedKey> {
    let blob = read_secret_file(&args.master, "Master key file")?;
    let password = prompt_password(false)?;

    let serialized = Zeroizing::new(
        decrypt(password.expose_secret().as_bytes(), &blob).map_err(CliError::from)?,
    );
    let text = std::str::from_utf8(&serialized).map_err(|_| {
        CliError::invalid_input("Master key file does not contain an extended key")
    })?;
    let master = ExtendedKey::from_base58(text).map_err(CliError::from)?;
    if !master.is_private() {
        return Err(CliError::invalid_input("Master key file holds a public key only").into());
    }
    Ok(master)
}

/// `path` and the `count - 1` siblings after it.
fn derive_consecutive(
    master: &ExtendedKey,
    path: &DerivationPath,
    count: u32,
) -> anyhow::Result<Vec<(DerivationPath, ExtendedKey)>> {
    let (last, parent) = path
        .indices()
        .split_last()
        .ok_or_else(|| CliError::invalid_input("--count needs a path with at least one index"))?;

    let start = match last {
        ChildIndex::Normal(i) => *i,
        ChildIndex::Hardened(_) => {
            return Err(CliError::invalid_input(
                "--count needs a path whose last index is not hardened",
            )
            .into())
        }
    };
    let end = start
        .checked_add(count)
        .filter(|end| *end <= HARDENED_OFFSET)
        .ok_or_else(|| CliError::invalid_input("--count runs past the last normal index"))?;

    let base = DerivationPath::from(parent.to_vec());
    Ok(derive_range(master, &base.to_string(), start..end)?)
}
