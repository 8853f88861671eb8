//! Key derivation using Argon2id.
//!
//! This module derives encryption keys from passwords using the Argon2id
//! algorithm, which is memory-hard and resistant to GPU-based attacks.
//! Cost parameters are explicit values carried in [`KdfParams`] rather than
//! globals, so tests can run with cheap settings while callers get
//! production-strength defaults.

use argon2::Argon2;
use zeroize::ZeroizeOnDrop;

use crate::error::{KeyvaultError, Result};

/// Default Argon2id memory cost: 64 MB (64 * 1024 KB).
pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
/// Default Argon2id iterations.
pub const DEFAULT_ITERATIONS: u32 = 3;
/// Default Argon2id parallelism.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Minimum salt length accepted by [`derive_key`].
pub const MIN_SALT_LENGTH: usize = 16;

/// Argon2id cost parameters.
///
/// These are written into every ciphertext blob, so a blob always decrypts
/// with the parameters it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl KdfParams {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check the parameters against Argon2's own limits.
    pub fn validate(&self) -> Result<()> {
        self.to_argon2().map(|_| ())
    }

    fn to_argon2(self) -> Result<argon2::Params> {
        argon2::Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LENGTH),
        )
        .map_err(|e| KeyvaultError::InvalidConfig(format!("Invalid Argon2 parameters: {}", e)))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, DEFAULT_PARALLELISM)
    }
}

/// A cryptographic key derived from a password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password bytes (may be empty; the cipher treats it as opaque)
/// * `salt` - Random salt, at least [`MIN_SALT_LENGTH`] bytes
/// * `params` - Argon2id cost parameters
///
/// # Security
///
/// - Same password + salt + params always produces the same key
/// - Different salt produces a different key (salt is stored in the blob)
///
/// # Examples
///
/// ```
/// use keyvault_core::crypto::{derive_key, KdfParams};
///
/// let params = KdfParams::new(256, 1, 1);
/// let key = derive_key(b"my-password", b"unique-salt-16-bytes", &params).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    if salt.len() < MIN_SALT_LENGTH {
        return Err(KeyvaultError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            MIN_SALT_LENGTH
        )));
    }

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params.to_argon2()?,
    );

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password, salt, &mut key_bytes)
        .map_err(|e| KeyvaultError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}
