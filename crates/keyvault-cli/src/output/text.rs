//! Plain text output for derived keys.

use keyvault_core::hd::DerivationPath;
use keyvault_core::ExtendedKey;
use zeroize::Zeroizing;

/// Print derived keys, one block per key.
///
/// In quiet mode only the private key hex is printed, one per line.
pub fn print_derived_keys(keys: &[(DerivationPath, ExtendedKey)], quiet: bool) {
    for (position, (path, key)) in keys.iter().enumerate() {
        let private_key = key
            .private_key_bytes()
            .map(|bytes| Zeroizing::new(hex::encode(&bytes[..])));

        if quiet {
            if let Some(private_key) = &private_key {
                println!("{}", private_key.as_str());
            }
            continue;
        }

        if position > 0 {
            println!();
        }
        println!("Path:        {}", path);
        if let Some(private_key) = &private_key {
            println!("Private key: {}", private_key.as_str());
        }
        println!("Public key:  {}", hex::encode(key.public_key_bytes()));
        println!("Xpub:        {}", key.to_public().to_base58().as_str());
    }
}
