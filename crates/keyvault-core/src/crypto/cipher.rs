//! Password-based authenticated encryption.
//!
//! Argon2id turns the password and a per-blob random salt into a 256-bit
//! key; AES-256-GCM encrypts the payload under a per-blob random nonce.
//! The output is a self-describing blob (see [`super::envelope`]) that
//! needs only the password to decrypt.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::{KeyvaultError, Result};

use super::envelope::{Header, HEADER_LENGTH, NONCE_LENGTH, SALT_LENGTH, TAG_LENGTH};
use super::kdf::{derive_key, KdfParams};

/// Encrypts and decrypts secrets under a password.
///
/// The configured [`KdfParams`] apply to encryption only. Decryption reads
/// the parameters stored in the blob.
#[derive(Debug, Clone, Default)]
pub struct PasswordCipher {
    params: KdfParams,
}

impl PasswordCipher {
    /// Create a cipher that derives keys with `params`.
    pub fn new(params: KdfParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Encrypt `plaintext` under `password`.
    ///
    /// A fresh salt and nonce are drawn from the OS on every call, so
    /// encrypting the same input twice yields different blobs.
    pub fn encrypt(&self, password: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut salt = [0u8; SALT_LENGTH];
        let mut nonce = [0u8; NONCE_LENGTH];
        fill_random(&mut salt)?;
        fill_random(&mut nonce)?;

        let header = Header {
            params: self.params,
            salt,
            nonce,
        };
        let header_bytes = header.to_bytes();

        let key = derive_key(password, &header.salt, &header.params)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| KeyvaultError::Crypto(format!("Invalid AES key: {}", e)))?;

        let sealed = cipher
            .encrypt(
                Nonce::from_slice(&header.nonce),
                Payload {
                    msg: plaintext,
                    aad: &header_bytes,
                },
            )
            .map_err(|e| KeyvaultError::Crypto(format!("Encryption failed: {}", e)))?;

        let mut blob = Vec::with_capacity(HEADER_LENGTH + sealed.len());
        blob.extend_from_slice(&header_bytes);
        blob.extend_from_slice(&sealed);

        tracing::debug!(
            plaintext_len = plaintext.len(),
            blob_len = blob.len(),
            memory_kib = self.params.memory_kib,
            "encrypted payload"
        );
        Ok(blob)
    }

    /// Decrypt a blob produced by [`PasswordCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// - `KeyvaultError::MalformedInput` if the blob is too short, has an
    ///   unknown version, or stores unusable KDF parameters
    /// - `KeyvaultError::Authentication` if the password is wrong or any
    ///   byte of the blob was modified
    pub fn decrypt(&self, password: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
        let (header, aad, sealed) = Header::parse(blob)?;

        let key = derive_key(password, &header.salt, &header.params)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| KeyvaultError::Crypto(format!("Invalid AES key: {}", e)))?;

        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(&header.nonce),
                Payload { msg: sealed, aad },
            )
            .map_err(|_| {
                tracing::debug!(blob_len = blob.len(), "ciphertext authentication failed");
                KeyvaultError::Authentication
            })?;

        debug_assert_eq!(plaintext.len() + TAG_LENGTH, sealed.len());
        tracing::debug!(plaintext_len = plaintext.len(), "decrypted payload");
        Ok(plaintext)
    }
}

/// Encrypt `plaintext` under `password` with the default KDF parameters.
///
/// # Examples
///
/// ```no_run
/// use keyvault_core::crypto::{decrypt, encrypt};
///
/// let blob = encrypt(b"password", b"secret seed").unwrap();
/// let plaintext = decrypt(b"password", &blob).unwrap();
/// assert_eq!(plaintext, b"secret seed");
/// ```
pub fn encrypt(password: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    PasswordCipher::default().encrypt(password, plaintext)
}

/// Decrypt a blob produced by [`encrypt`] or [`PasswordCipher::encrypt`].
pub fn decrypt(password: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    PasswordCipher::default().decrypt(password, blob)
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)
        .map_err(|e| KeyvaultError::Crypto(format!("Failed to gather randomness: {}", e)))
}
