//! Password-based encryption for secrets at rest.
//!
//! Built on well-audited RustCrypto primitives:
//! - **Argon2id**: memory-hard key derivation from the password
//! - **AES-256-GCM**: authenticated encryption of the payload
//!
//! ## Security Model
//!
//! - Fresh random salt and nonce for every blob
//! - KDF parameters stored in, and authenticated with, the blob header
//! - Wrong password and tampering are indistinguishable and both rejected
//!   before any plaintext is returned
//! - Derived keys zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted blob
//! - Offline brute-force attacks on the password
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to process memory while a secret is in use

pub mod cipher;
pub mod envelope;
pub mod kdf;
pub mod password;

pub use cipher::{decrypt, encrypt, PasswordCipher};
pub use kdf::{derive_key, DerivedKey, KdfParams};
pub use password::validate_password;
