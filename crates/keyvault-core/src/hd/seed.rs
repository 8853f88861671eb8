//! BIP39 seed derivation.
//!
//! `seed = PBKDF2-HMAC-SHA512(password = mnemonic, salt = "mnemonic" ‖ passphrase, 2048, 64)`
//!
//! The phrase is used as given: no word-list lookup, no checksum check.

use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 rounds fixed by BIP39.
const PBKDF2_ROUNDS: u32 = 2048;

/// A 64-byte BIP39 seed, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; Seed::LEN]);

impl Seed {
    pub const LEN: usize = 64;

    /// Wrap raw seed bytes (stored seeds, test vectors).
    pub fn from_bytes(bytes: [u8; Seed::LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Seed::LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Seed").field(&"[REDACTED]").finish()
    }
}

/// Derive the BIP39 seed for `mnemonic` and an optional `passphrase`
/// (use `""` for none).
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> Seed {
    let mut salt = Vec::with_capacity(8 + passphrase.len());
    salt.extend_from_slice(b"mnemonic");
    salt.extend_from_slice(passphrase.as_bytes());

    let mut output = [0u8; Seed::LEN];
    pbkdf2::pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), &salt, PBKDF2_ROUNDS, &mut output);
    salt.zeroize();

    Seed(output)
}
