//! Error types for Keyvault core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer will map these
//! to user-friendly messages and exit codes.
//!
//! No variant ever carries a password, seed or key bytes.

use thiserror::Error;

/// Result type alias for Keyvault operations.
pub type Result<T> = std::result::Result<T, KeyvaultError>;

/// Core error type for Keyvault operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyvaultError {
    /// Wrong password, or the ciphertext was modified after encryption
    #[error("Authentication failed: wrong password or tampered ciphertext")]
    Authentication,

    /// Ciphertext blob or serialized key is truncated or structurally invalid
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Derivation path syntax error
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    /// BIP32 invalid-key case or missing private key material
    #[error("Derivation error: {0}")]
    Derivation(String),

    /// Key derivation function parameters rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid caller input (seed length, weak password)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure inside a cryptographic primitive or the OS random source
    #[error("Crypto error: {0}")]
    Crypto(String),
}
