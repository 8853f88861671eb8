//! BIP32 hierarchical deterministic key derivation on secp256k1, seeded
//! from BIP39 mnemonics.
//!
//! ```text
//! mnemonic ──PBKDF2──▶ seed ──HMAC("Bitcoin seed")──▶ master ──CKD*──▶ child
//! ```

pub mod derive;
pub mod extended_key;
pub mod path;
pub mod seed;

pub use derive::{derive_child_key, derive_path, derive_range};
pub use extended_key::ExtendedKey;
pub use path::{ChildIndex, DerivationPath, HARDENED_OFFSET};
pub use seed::{seed_from_mnemonic, Seed};
