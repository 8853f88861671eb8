//! JSON output formatting for derived keys.

use keyvault_core::hd::DerivationPath;
use keyvault_core::ExtendedKey;

use crate::config::KeyvaultConfig;

/// Convert a derived key to JSON for output.
///
/// Includes the private key: this is what `derive` exists to print.
pub fn derived_key_json(path: &DerivationPath, key: &ExtendedKey) -> serde_json::Value {
    let private_key = key
        .private_key_bytes()
        .map(|bytes| hex::encode(&bytes[..]));
    serde_json::json!({
        "path": path.to_string(),
        "private_key": private_key,
        "public_key": hex::encode(key.public_key_bytes()),
        "xpub": key.to_public().to_base58().as_str(),
        "parent_fingerprint": hex::encode(key.parent_fingerprint()),
    })
}

/// Convert multiple derived keys to JSON array for output.
pub fn derived_keys_json(keys: &[(DerivationPath, ExtendedKey)]) -> Vec<serde_json::Value> {
    keys.iter()
        .map(|(path, key)| derived_key_json(path, key))
        .collect()
}

pub fn config_json(config: &KeyvaultConfig) -> serde_json::Value {
    serde_json::json!({
        "kdf": {
            "memory_kib": config.kdf.memory_kib,
            "iterations": config.kdf.iterations,
            "parallelism": config.kdf.parallelism,
        },
        "derivation": {
            "default_path": config.derivation.default_path,
        },
    })
}
