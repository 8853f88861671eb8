//! BIP32 extended keys over secp256k1.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>

use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::error::{KeyvaultError, Result};

use super::path::{ChildIndex, DerivationPath};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Mainnet version bytes (`xprv` / `xpub`).
const VERSION_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
const VERSION_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// Length of a serialized extended key, before the Base58Check checksum.
pub const SERIALIZED_LENGTH: usize = 78;

pub const MIN_SEED_LENGTH: usize = 16;
pub const MAX_SEED_LENGTH: usize = 64;

#[derive(Clone)]
enum KeyMaterial {
    /// `SecretKey` zeroizes itself on drop.
    Private(SecretKey),
    Public(PublicKey),
}

/// A BIP32 extended key: a private scalar or public point plus chain code
/// and tree metadata.
///
/// Every derivation returns a new, independently owned key. Private
/// material and chain codes are zeroized on drop, and `Debug` never prints
/// them.
#[derive(Clone)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
}

impl ExtendedKey {
    /// Build the master key from a BIP39 (or raw) seed of 16 to 64 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !(MIN_SEED_LENGTH..=MAX_SEED_LENGTH).contains(&seed.len()) {
            return Err(KeyvaultError::InvalidInput(format!(
                "Seed must be {} to {} bytes, got {}",
                MIN_SEED_LENGTH,
                MAX_SEED_LENGTH,
                seed.len()
            )));
        }

        let i = hmac_sha512(MASTER_HMAC_KEY, seed)?;
        let (il, ir) = i.split_at(32);

        let secret = SecretKey::from_slice(il).map_err(|_| {
            KeyvaultError::Derivation("Seed produces an invalid master key".to_string())
        })?;

        Ok(Self {
            key: KeyMaterial::Private(secret),
            chain_code: chain_code_from(ir),
            depth: 0,
            parent_fingerprint: [0; 4],
            child_index: 0,
        })
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> ChildIndex {
        ChildIndex::from_raw(self.child_index)
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// The 32-byte private scalar, or `None` for a public-only key.
    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; 32]>> {
        match &self.key {
            KeyMaterial::Private(secret) => Some(Zeroizing::new(secret.to_bytes().into())),
            KeyMaterial::Public(_) => None,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private(secret) => secret.public_key(),
            KeyMaterial::Public(public) => *public,
        }
    }

    /// SEC1 compressed public key (33 bytes).
    pub fn public_key_bytes(&self) -> [u8; 33] {
        let encoded = self.public_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// First four bytes of HASH160 of the compressed public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = Ripemd160::digest(Sha256::digest(self.public_key_bytes()));
        let mut out = [0u8; 4];
        out.copy_from_slice(&hash[..4]);
        out
    }

    /// Drop the private key, keeping everything else (BIP32 "neuter").
    pub fn to_public(&self) -> ExtendedKey {
        ExtendedKey {
            key: KeyMaterial::Public(self.public_key()),
            chain_code: self.chain_code.clone(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
        }
    }

    /// One CKD step.
    ///
    /// Private keys use CKDpriv for both kinds of index. Public-only keys
    /// use CKDpub and cannot take hardened steps.
    ///
    /// # Errors
    ///
    /// - `KeyvaultError::Derivation` for a hardened index on a public-only
    ///   key, when `parse256(IL) ≥ n` or the child key is zero/infinity,
    ///   or past depth 255
    pub fn derive_child(&self, index: ChildIndex) -> Result<ExtendedKey> {
        let depth = self.depth.checked_add(1).ok_or_else(|| {
            KeyvaultError::Derivation("Maximum derivation depth (255) exceeded".to_string())
        })?;
        let raw = index.to_raw();

        let mut data = Zeroizing::new(Vec::with_capacity(37));
        match (&self.key, index.is_hardened()) {
            (KeyMaterial::Private(secret), true) => {
                let secret_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(secret.to_bytes().into());
                data.push(0x00);
                data.extend_from_slice(secret_bytes.as_ref());
            }
            (KeyMaterial::Public(_), true) => {
                return Err(KeyvaultError::Derivation(format!(
                    "Hardened index {} requires a private key",
                    index
                )));
            }
            (_, false) => data.extend_from_slice(&self.public_key_bytes()),
        }
        data.extend_from_slice(&raw.to_be_bytes());

        let i = hmac_sha512(self.chain_code.as_ref(), &data)?;
        let (il, ir) = i.split_at(32);

        let key = match &self.key {
            KeyMaterial::Private(secret) => {
                KeyMaterial::Private(tweak_private(secret, il).ok_or_else(|| invalid_child(index))?)
            }
            KeyMaterial::Public(public) => {
                KeyMaterial::Public(tweak_public(public, il).ok_or_else(|| invalid_child(index))?)
            }
        };

        Ok(ExtendedKey {
            key,
            chain_code: chain_code_from(ir),
            depth,
            parent_fingerprint: self.fingerprint(),
            child_index: raw,
        })
    }

    /// Walk `path` from this key, one CKD step per index.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey> {
        path.iter().try_fold(self.clone(), |key, index| {
            let child = key.derive_child(*index)?;
            tracing::trace!(depth = child.depth, index = %index, "derived child key");
            Ok(child)
        })
    }

    /// BIP32 serialization: version ‖ depth ‖ parent fingerprint ‖ child
    /// index ‖ chain code ‖ key data.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SERIALIZED_LENGTH]> {
        let mut out = Zeroizing::new([0u8; SERIALIZED_LENGTH]);
        let version = if self.is_private() {
            VERSION_PRIVATE
        } else {
            VERSION_PUBLIC
        };
        out[0..4].copy_from_slice(&version);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_index.to_be_bytes());
        out[13..45].copy_from_slice(self.chain_code.as_ref());
        match &self.key {
            KeyMaterial::Private(secret) => {
                out[45] = 0x00;
                let secret_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(secret.to_bytes().into());
                out[46..78].copy_from_slice(secret_bytes.as_ref());
            }
            KeyMaterial::Public(_) => out[45..78].copy_from_slice(&self.public_key_bytes()),
        }
        out
    }

    /// Base58Check string (`xprv...` or `xpub...`).
    pub fn to_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(bs58::encode(&self.to_bytes()[..]).with_check().into_string())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SERIALIZED_LENGTH {
            return Err(malformed(format!(
                "Extended key must be {} bytes, got {}",
                SERIALIZED_LENGTH,
                bytes.len()
            )));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&bytes[0..4]);
        let depth = bytes[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&bytes[5..9]);
        let mut index = [0u8; 4];
        index.copy_from_slice(&bytes[9..13]);
        let child_index = u32::from_be_bytes(index);
        let key_data = &bytes[45..78];

        if depth == 0 && (parent_fingerprint != [0; 4] || child_index != 0) {
            return Err(malformed(
                "Master key must have zero parent fingerprint and index".to_string(),
            ));
        }

        let key = match version {
            VERSION_PRIVATE => {
                if key_data[0] != 0x00 {
                    return Err(malformed("Private key data must start with 0x00".to_string()));
                }
                let secret = SecretKey::from_slice(&key_data[1..])
                    .map_err(|_| malformed("Invalid private key".to_string()))?;
                KeyMaterial::Private(secret)
            }
            VERSION_PUBLIC => {
                if key_data[0] != 0x02 && key_data[0] != 0x03 {
                    return Err(malformed("Public key must be compressed".to_string()));
                }
                let public = PublicKey::from_sec1_bytes(key_data)
                    .map_err(|_| malformed("Invalid public key".to_string()))?;
                KeyMaterial::Public(public)
            }
            _ => return Err(malformed("Unknown extended key version".to_string())),
        };

        Ok(ExtendedKey {
            key,
            chain_code: chain_code_from(&bytes[13..45]),
            depth,
            parent_fingerprint,
            child_index,
        })
    }

    pub fn from_base58(encoded: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            bs58::decode(encoded.trim())
                .with_check(None)
                .into_vec()
                .map_err(|e| malformed(format!("Invalid Base58Check: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }
}

impl PartialEq for ExtendedKey {
    fn eq(&self, other: &Self) -> bool {
        *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for ExtendedKey {}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private", &self.is_private())
            .field("depth", &self.depth)
            .field("child_index", &self.child_index())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// `parse256(IL) + k mod n`, or `None` for BIP32's invalid-child case.
fn tweak_private(parent: &SecretKey, il: &[u8]) -> Option<SecretKey> {
    let tweak: Scalar = Option::from(Scalar::from_repr(FieldBytes::clone_from_slice(il)))?;
    let parent_scalar: Scalar = *parent.to_nonzero_scalar();
    let child: NonZeroScalar = Option::from(NonZeroScalar::new(tweak + parent_scalar))?;
    Some(SecretKey::from(child))
}

/// `point(parse256(IL)) + K`, or `None` for BIP32's invalid-child case.
fn tweak_public(parent: &PublicKey, il: &[u8]) -> Option<PublicKey> {
    let tweak: Scalar = Option::from(Scalar::from_repr(FieldBytes::clone_from_slice(il)))?;
    let point = ProjectivePoint::GENERATOR * tweak + parent.to_projective();
    let affine: AffinePoint = point.into();
    PublicKey::from_affine(affine).ok()
}

fn invalid_child(index: ChildIndex) -> KeyvaultError {
    KeyvaultError::Derivation(format!(
        "Index {} yields an invalid child key; use the next index",
        index
    ))
}

fn malformed(message: String) -> KeyvaultError {
    KeyvaultError::MalformedInput(message)
}

fn chain_code_from(bytes: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut chain_code = Zeroizing::new([0u8; 32]);
    chain_code.copy_from_slice(bytes);
    chain_code
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| KeyvaultError::Crypto(format!("HMAC-SHA512 key init failed: {}", e)))?;
    mac.update(data);

    let mut output = Zeroizing::new([0u8; 64]);
    output.copy_from_slice(&mac.finalize().into_bytes());
    Ok(output)
}
