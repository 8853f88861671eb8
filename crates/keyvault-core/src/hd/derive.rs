//! Path-based derivation entry points.

use std::ops::Range;

use crate::error::Result;

use super::extended_key::ExtendedKey;
use super::path::{ChildIndex, DerivationPath};

/// Derive the key at `path` (e.g. `m/44'/60'/0'/0/0`) from `master`.
///
/// The path is fully parsed before any derivation work, so a malformed
/// path fails with `KeyvaultError::InvalidPath` without touching key
/// material. `master` is not modified and the result owns its own copy of
/// everything it needs. Safe to call from many threads on a shared master.
///
/// # Examples
///
/// ```
/// use keyvault_core::hd::{derive_child_key, seed_from_mnemonic, ExtendedKey};
///
/// let seed = seed_from_mnemonic("test test test test test test test test test test test junk", "");
/// let master = ExtendedKey::from_seed(seed.as_bytes()).unwrap();
/// let key = derive_child_key(&master, "m/44'/60'/0'/0/0").unwrap();
///
/// assert_eq!(
///     hex::encode(&key.private_key_bytes().unwrap()[..]),
///     "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
/// );
/// ```
pub fn derive_child_key(master: &ExtendedKey, path: &str) -> Result<ExtendedKey> {
    let path: DerivationPath = path.parse()?;
    derive_path(master, &path)
}

/// Same as [`derive_child_key`] for an already parsed path.
pub fn derive_path(master: &ExtendedKey, path: &DerivationPath) -> Result<ExtendedKey> {
    tracing::debug!(path = %path, depth = path.len(), "deriving key");
    master.derive_path(path)
}

/// Derive `base_path/i` for every `i` in `indices` (normal children).
///
/// The common prefix is walked once. Fails on the first invalid child;
/// partial results are discarded.
pub fn derive_range(
    master: &ExtendedKey,
    base_path: &str,
    indices: Range<u32>,
) -> Result<Vec<(DerivationPath, ExtendedKey)>> {
    let base: DerivationPath = base_path.parse()?;
    let parent = derive_path(master, &base)?;

    tracing::debug!(base = %base, start = indices.start, end = indices.end, "deriving key range");

    indices
        .map(|i| {
            let index = ChildIndex::normal(i)?;
            let key = parent.derive_child(index)?;
            Ok((base.child(index), key))
        })
        .collect()
}
