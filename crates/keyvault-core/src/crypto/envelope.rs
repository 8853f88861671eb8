//! Ciphertext blob layout.
//!
//! ```text
//! version(1) | memory_kib(4) | iterations(4) | parallelism(4) | salt(16) | nonce(12) | ciphertext ‖ tag(16)
//! ```
//!
//! Integers are big-endian. The 41-byte header is authenticated as AEAD
//! associated data, so the KDF parameters cannot be swapped without the
//! tag check failing.

use crate::error::{KeyvaultError, Result};

use super::kdf::KdfParams;

/// Current blob format version.
pub const FORMAT_VERSION: u8 = 0x01;

pub const SALT_LENGTH: usize = 16;
pub const NONCE_LENGTH: usize = 12;
pub const TAG_LENGTH: usize = 16;

/// Version byte + three u32 KDF parameters + salt + nonce.
pub const HEADER_LENGTH: usize = 1 + 3 * 4 + SALT_LENGTH + NONCE_LENGTH;

/// Smallest well-formed blob: header plus the tag of an empty plaintext.
pub const MIN_BLOB_LENGTH: usize = HEADER_LENGTH + TAG_LENGTH;

/// Upper bounds on stored KDF parameters. A header above these is treated
/// as malformed before any key derivation runs.
pub const MAX_MEMORY_KIB: u32 = 1024 * 1024;
pub const MAX_ITERATIONS: u32 = 64;
pub const MAX_PARALLELISM: u32 = 16;

/// Parsed blob header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub params: KdfParams,
    pub salt: [u8; SALT_LENGTH],
    pub nonce: [u8; NONCE_LENGTH],
}

impl Header {
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut out = [0u8; HEADER_LENGTH];
        out[0] = FORMAT_VERSION;
        out[1..5].copy_from_slice(&self.params.memory_kib.to_be_bytes());
        out[5..9].copy_from_slice(&self.params.iterations.to_be_bytes());
        out[9..13].copy_from_slice(&self.params.parallelism.to_be_bytes());
        out[13..13 + SALT_LENGTH].copy_from_slice(&self.salt);
        out[13 + SALT_LENGTH..].copy_from_slice(&self.nonce);
        out
    }

    /// Split a blob into its header, the raw header bytes (for use as
    /// associated data) and the ciphertext-with-tag.
    pub fn parse(blob: &[u8]) -> Result<(Header, &[u8], &[u8])> {
        if blob.len() < MIN_BLOB_LENGTH {
            return Err(KeyvaultError::MalformedInput(format!(
                "Ciphertext too short: {} bytes (minimum {})",
                blob.len(),
                MIN_BLOB_LENGTH
            )));
        }

        let (header_bytes, body) = blob.split_at(HEADER_LENGTH);
        if header_bytes[0] != FORMAT_VERSION {
            return Err(KeyvaultError::MalformedInput(format!(
                "Unsupported ciphertext version: {}",
                header_bytes[0]
            )));
        }

        let params = KdfParams::new(
            read_u32(&header_bytes[1..5]),
            read_u32(&header_bytes[5..9]),
            read_u32(&header_bytes[9..13]),
        );
        check_bounds(&params)?;
        params
            .validate()
            .map_err(|_| KeyvaultError::MalformedInput("Invalid KDF parameters".to_string()))?;

        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(&header_bytes[13..13 + SALT_LENGTH]);
        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(&header_bytes[13 + SALT_LENGTH..]);

        Ok((
            Header {
                params,
                salt,
                nonce,
            },
            header_bytes,
            body,
        ))
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

fn check_bounds(params: &KdfParams) -> Result<()> {
    if params.memory_kib > MAX_MEMORY_KIB
        || params.iterations > MAX_ITERATIONS
        || params.parallelism > MAX_PARALLELISM
    {
        return Err(KeyvaultError::MalformedInput(format!(
            "KDF parameters out of range (m={}, t={}, p={})",
            params.memory_kib, params.iterations, params.parallelism
        )));
    }
    Ok(())
}
