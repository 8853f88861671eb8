//! # Keyvault Core
//!
//! Core library for Keyvault - password-protected secrets and hierarchical
//! deterministic keys for wallet tooling.
//!
//! This crate provides the cryptographic primitives independent of the CLI
//! interface.
//!
//! ## Architecture
//!
//! - **crypto**: Argon2id + AES-256-GCM password cipher and its blob format
//! - **hd**: BIP39 seeds, BIP32 extended keys and path derivation
//! - **error**: Shared error taxonomy
//!
//! ## Example
//!
//! ```
//! use keyvault_core::{decrypt, encrypt};
//!
//! let blob = encrypt(b"correct horse", b"xprv...").unwrap();
//! assert_eq!(decrypt(b"correct horse", &blob).unwrap(), b"xprv...");
//! ```

pub mod crypto;
pub mod error;
pub mod hd;

pub use crypto::{decrypt, encrypt, KdfParams, PasswordCipher};
pub use error::{KeyvaultError, Result};
pub use hd::{derive_child_key, DerivationPath, ExtendedKey};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
